use crate::checksum::{checksum, write_checksum};

/// Type 3: Destination Unreachable.
pub const ICMP_DEST_UNREACHABLE: u8 = 3;
/// Code 4: Fragmentation Needed and DF set.
pub const ICMP_FRAG_NEEDED: u8 = 4;

pub const ICMP_HEADER_LEN: usize = 8;
/// Cabeçalho IP original (20) + 64 bits do datagrama original (RFC 792).
pub const ICMP_QUOTE_LEN: usize = 28;
pub const ICMP_MESSAGE_LEN: usize = ICMP_HEADER_LEN + ICMP_QUOTE_LEN;

/// Monta uma mensagem ICMP "Fragmentation Needed" (type=3, code=4) com o
/// Next-Hop MTU informado e o payload de 28 bytes zerado.
pub fn build_frag_needed(next_hop_mtu: u16) -> [u8; ICMP_MESSAGE_LEN] {
    build_frag_needed_quoting(next_hop_mtu, &[])
}

/// Igual a [`build_frag_needed`], mas copia os primeiros bytes do datagrama
/// que "não coube" para o payload. Bytes além de 28 são ignorados e o que
/// faltar fica zerado, então o tamanho é sempre 36.
pub fn build_frag_needed_quoting(next_hop_mtu: u16, original: &[u8]) -> [u8; ICMP_MESSAGE_LEN] {
    let mut msg = [0u8; ICMP_MESSAGE_LEN];

    // Type, Code, checksum placeholder (2 bytes) e Unused (2 bytes)
    msg[0] = ICMP_DEST_UNREACHABLE;
    msg[1] = ICMP_FRAG_NEEDED;

    // Next-Hop MTU (big-endian)
    msg[6..8].copy_from_slice(&next_hop_mtu.to_be_bytes());

    let quoted = original.len().min(ICMP_QUOTE_LEN);
    msg[ICMP_HEADER_LEN..ICMP_HEADER_LEN + quoted].copy_from_slice(&original[..quoted]);

    let csum = checksum(&msg);
    write_checksum(&mut msg, 2, csum);

    msg
}
