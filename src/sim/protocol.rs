/// Wire protocol: parsing client datagrams into a tagged message, and
/// formatting every server-to-client message named in the wire contract.
///
/// The message parser produces a tagged `ClientMessage` variant rather than
/// dispatching on string prefixes inline at every call site — unknown verbs
/// become `None` and are dropped silently by the caller, matching the
/// "malformed messages are ignored" error-handling rule.

use crate::domain::grid::Grid;

#[derive(Clone, Debug, PartialEq)]
pub enum ClientMessage {
    Play(String),
    Spectate,
    Key(char),
}

/// Parse one inbound datagram. Returns `None` for anything that isn't one
/// of the three recognized verbs; the caller drops those with no reply.
pub fn parse_client_message(raw: &str) -> Option<ClientMessage> {
    let raw = raw.trim_end_matches(['\r', '\n']);

    if let Some(name) = raw.strip_prefix("PLAY ") {
        return Some(ClientMessage::Play(name.to_string()));
    }
    if raw == "SPECTATE" {
        return Some(ClientMessage::Spectate);
    }
    if let Some(rest) = raw.strip_prefix("KEY ") {
        let mut chars = rest.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        return Some(ClientMessage::Key(key));
    }
    None
}

/// Reject empty or all-invalid names, truncate to `max_len`, and replace
/// any character that is neither printable-graphic nor blank with `_`.
///
/// Validity is tracked per original character as it's scanned, not by
/// inspecting the sanitized output afterward — a name made entirely of
/// legitimately-graphic characters like `_` must not be rejected just
/// because it happens to look like the replacement marker.
pub fn sanitize_name(raw: &str, max_len: usize) -> Option<String> {
    let truncated: String = raw.chars().take(max_len).collect();
    if truncated.is_empty() {
        return None;
    }

    let mut valid = false;
    let sanitized: String = truncated
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() || c == ' ' || c == '\t' {
                valid = true;
                c
            } else {
                '_'
            }
        })
        .collect();

    if !valid {
        return None;
    }

    Some(sanitized)
}

pub fn format_ok(letter: char) -> String {
    format!("OK {letter}")
}

/// `GRID H W`, carrying the historical `+1` inflation — the only place in
/// this codebase that number is allowed to appear.
pub fn format_grid(grid: &Grid) -> String {
    format!("GRID {} {}", grid.height() + 1, grid.width() + 1)
}

pub fn format_gold(collected: i32, purse: i32, remaining: i32) -> String {
    format!("GOLD {collected} {purse} {remaining}")
}

pub fn format_display(grid: &Grid) -> String {
    let mut out = String::from("DISPLAY\n");
    for row in grid.rows() {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

pub fn format_quit(reason: &str) -> String {
    format!("QUIT {reason}")
}

pub fn format_error(text: &str) -> String {
    format!("ERROR {text}")
}
