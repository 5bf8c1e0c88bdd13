//! Cross-subsystem flows: definition store (01), indexed queries (02) and
//! verification (03) wired the way the node wires them.

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod boundary_flows;
#[cfg(test)]
mod verification_flows;
