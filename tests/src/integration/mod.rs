//! Integration flows spanning ks-01 and ks-02.

pub mod gateway_flows;
pub mod view_flows;
