//! Forja de mensagens ICMP "Fragmentation Needed" (type 3, code 4) com
//! Next-Hop MTU arbitrário, para testar a reação de um host a PMTUD.

pub mod checksum;
pub mod error;
pub mod icmp;
pub mod ipv4;
pub mod packet;
pub mod parse;
pub mod privilege;
pub mod transport;

pub use error::{PtbError, parse_ipv4};
pub use packet::{PACKET_LEN, assemble, assemble_with_id, send_packet_too_big};
pub use transport::{RawSocketTransport, Transport};
