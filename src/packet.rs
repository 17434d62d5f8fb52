use std::net::Ipv4Addr;

use rand::Rng;

use crate::error::PtbError;
use crate::icmp::{self, ICMP_MESSAGE_LEN};
use crate::ipv4::{self, IPV4_HEADER_LEN};
use crate::transport::Transport;

pub const PACKET_LEN: usize = IPV4_HEADER_LEN + ICMP_MESSAGE_LEN;

/// Monta o pacote completo (IPv4 + ICMP "Packet Too Big") com uma
/// identificação sorteada de `rng`.
pub fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    src: Ipv4Addr,
    dst: Ipv4Addr,
    next_hop_mtu: u16,
) -> Vec<u8> {
    assemble_with_id(src, dst, next_hop_mtu, rng.r#gen())
}

/// Versão determinística de [`assemble`]: mesma entrada, mesmos bytes.
pub fn assemble_with_id(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    next_hop_mtu: u16,
    identification: u16,
) -> Vec<u8> {
    let msg = icmp::build_frag_needed(next_hop_mtu);
    concat(src, dst, &msg, identification)
}

/// Como [`assemble_with_id`], citando o início do datagrama original no payload ICMP.
pub fn assemble_quoting(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    next_hop_mtu: u16,
    identification: u16,
    original: &[u8],
) -> Vec<u8> {
    let msg = icmp::build_frag_needed_quoting(next_hop_mtu, original);
    concat(src, dst, &msg, identification)
}

fn concat(src: Ipv4Addr, dst: Ipv4Addr, msg: &[u8], identification: u16) -> Vec<u8> {
    let total_len = (IPV4_HEADER_LEN + msg.len()) as u16;
    let hdr = ipv4::build_header(src, dst, total_len, identification);

    let mut pkt = Vec::with_capacity(total_len as usize);
    pkt.extend_from_slice(&hdr);
    pkt.extend_from_slice(msg);
    pkt
}

/// Monta o pacote e entrega ao transporte sem alterações.
/// Devolve os bytes enviados.
pub fn send_packet_too_big<T, R>(
    transport: &T,
    rng: &mut R,
    src: Ipv4Addr,
    dst: Ipv4Addr,
    next_hop_mtu: u16,
) -> Result<Vec<u8>, PtbError>
where
    T: Transport + ?Sized,
    R: Rng + ?Sized,
{
    let pkt = assemble(rng, src, dst, next_hop_mtu);
    transport.send(src, dst, &pkt)?;
    Ok(pkt)
}
