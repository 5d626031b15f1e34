//! Cross-crate scenarios.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod amendment_flow;

#[cfg(test)]
mod gateway_flow;

#[cfg(test)]
mod supervision_flow;
