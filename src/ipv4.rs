use std::net::Ipv4Addr;

use crate::checksum::{checksum, write_checksum};

pub const IPV4_HEADER_LEN: usize = 20;
/// Version=4, IHL=5 (sem opções).
pub const IPV4_VERSION_IHL: u8 = 0x45;
/// Flag DF ligada, sem MF, offset 0.
pub const IPV4_FLAGS_DF: u16 = 0x4000;
pub const IPV4_TTL: u8 = 128;
pub const IPPROTO_ICMP: u8 = 1;

/// Monta um cabeçalho IPv4 de 20 bytes (sem opções) para um payload ICMP.
///
/// `total_length` cobre cabeçalho + payload. O checksum é calculado com o
/// campo zerado e gravado nos bytes 10-11.
pub fn build_header(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    total_length: u16,
    identification: u16,
) -> [u8; IPV4_HEADER_LEN] {
    let mut hdr = [0u8; IPV4_HEADER_LEN];

    hdr[0] = IPV4_VERSION_IHL;
    hdr[1] = 0; // TOS
    hdr[2..4].copy_from_slice(&total_length.to_be_bytes());
    hdr[4..6].copy_from_slice(&identification.to_be_bytes());
    hdr[6..8].copy_from_slice(&IPV4_FLAGS_DF.to_be_bytes());
    hdr[8] = IPV4_TTL;
    hdr[9] = IPPROTO_ICMP;
    // 10-11: checksum, ainda zerado
    hdr[12..16].copy_from_slice(&src.octets());
    hdr[16..20].copy_from_slice(&dst.octets());

    let csum = checksum(&hdr);
    write_checksum(&mut hdr, 10, csum);

    hdr
}
