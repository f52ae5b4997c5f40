//! Minimal interval containers. Set algebra lives in the caller's interval library; these types
//! only carry bounds and payloads into the layout strategies.

pub(crate) mod set;
