//! Inbound adapters translating transport traffic onto the domain's
//! driving ports.

pub mod http;
