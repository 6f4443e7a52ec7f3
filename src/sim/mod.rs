/// Game-lifecycle layer: gold distribution, wire protocol, movement
/// resolution, broadcast, and the coordinator that ties them together.

pub mod broadcast;
pub mod coordinator;
pub mod gold;
pub mod movement;
pub mod protocol;
