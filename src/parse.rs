//! Decodificação do pacote montado, usada no `--dry-run` e nos testes.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::checksum::checksum;
use crate::icmp::ICMP_HEADER_LEN;
use crate::ipv4::{IPPROTO_ICMP, IPV4_HEADER_LEN};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("pacote truncado: {got} bytes, esperado ao menos {need}")]
    Truncated { got: usize, need: usize },
    #[error("versão IP {0} não suportada")]
    NotIpv4(u8),
    #[error("cabeçalho IPv4 com opções (IHL={0})")]
    HasOptions(u8),
    #[error("protocolo {0} não é ICMP")]
    NotIcmp(u8),
    #[error("checksum inválido no {0}")]
    BadChecksum(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    pub total_length: u16,
    pub identification: u16,
    pub dont_fragment: bool,
    pub ttl: u8,
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
    pub icmp_type: u8,
    pub icmp_code: u8,
    pub next_hop_mtu: u16,
    pub quote: Vec<u8>,
}

pub fn decode(buf: &[u8]) -> Result<DecodedPacket, DecodeError> {
    let need = IPV4_HEADER_LEN + ICMP_HEADER_LEN;
    if buf.len() < need {
        return Err(DecodeError::Truncated { got: buf.len(), need });
    }

    let version = buf[0] >> 4;
    if version != 4 {
        return Err(DecodeError::NotIpv4(version));
    }
    let ihl = buf[0] & 0x0F;
    if ihl != 5 {
        return Err(DecodeError::HasOptions(ihl));
    }
    if buf[9] != IPPROTO_ICMP {
        return Err(DecodeError::NotIcmp(buf[9]));
    }

    let total_length = u16::from_be_bytes([buf[2], buf[3]]);
    if (total_length as usize) < need || buf.len() < total_length as usize {
        return Err(DecodeError::Truncated {
            got: buf.len(),
            need: (total_length as usize).max(need),
        });
    }

    let (hdr, icmp) = buf[..total_length as usize].split_at(IPV4_HEADER_LEN);
    if checksum(hdr) != 0 {
        return Err(DecodeError::BadChecksum("cabeçalho IPv4"));
    }
    if checksum(icmp) != 0 {
        return Err(DecodeError::BadChecksum("ICMP"));
    }

    let flags = u16::from_be_bytes([hdr[6], hdr[7]]);

    Ok(DecodedPacket {
        total_length,
        identification: u16::from_be_bytes([hdr[4], hdr[5]]),
        dont_fragment: flags & 0x4000 != 0,
        ttl: hdr[8],
        src: Ipv4Addr::new(hdr[12], hdr[13], hdr[14], hdr[15]),
        dst: Ipv4Addr::new(hdr[16], hdr[17], hdr[18], hdr[19]),
        icmp_type: icmp[0],
        icmp_code: icmp[1],
        next_hop_mtu: u16::from_be_bytes([icmp[6], icmp[7]]),
        quote: icmp[ICMP_HEADER_LEN..].to_vec(),
    })
}

/// Hex dump em linhas de 16 bytes, no estilo `xxd` sem a coluna ASCII.
pub fn hex_dump(buf: &[u8]) -> String {
    buf.chunks(16)
        .enumerate()
        .map(|(i, line)| {
            let bytes: Vec<String> = line.iter().map(|b| format!("{b:02x}")).collect();
            format!("{:04x}: {}", i * 16, bytes.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::assemble_with_id;

    const SRC: Ipv4Addr = Ipv4Addr::new(1, 2, 3, 4);
    const DST: Ipv4Addr = Ipv4Addr::new(5, 6, 7, 8);

    #[test]
    fn decodes_assembled_packet() {
        let pkt = assemble_with_id(SRC, DST, 1500, 0x1234);
        let d = decode(&pkt).unwrap();
        assert_eq!(d.total_length, 56);
        assert_eq!(d.identification, 0x1234);
        assert!(d.dont_fragment);
        assert_eq!(d.ttl, 128);
        assert_eq!((d.src, d.dst), (SRC, DST));
        assert_eq!((d.icmp_type, d.icmp_code), (3, 4));
        assert_eq!(d.next_hop_mtu, 1500);
        assert_eq!(d.quote, vec![0u8; 28]);
    }

    #[test]
    fn rejects_short_buffer() {
        assert_eq!(
            decode(&[0x45; 10]),
            Err(DecodeError::Truncated { got: 10, need: 28 })
        );
    }

    #[test]
    fn rejects_total_length_past_buffer() {
        let pkt = assemble_with_id(SRC, DST, 1500, 1);
        assert!(matches!(
            decode(&pkt[..40]),
            Err(DecodeError::Truncated { got: 40, need: 56 })
        ));
    }

    #[test]
    fn rejects_wrong_version_and_options() {
        let mut pkt = assemble_with_id(SRC, DST, 1500, 1);
        pkt[0] = 0x65;
        assert_eq!(decode(&pkt), Err(DecodeError::NotIpv4(6)));
        pkt[0] = 0x46;
        assert_eq!(decode(&pkt), Err(DecodeError::HasOptions(6)));
    }

    #[test]
    fn rejects_other_protocols() {
        let mut pkt = assemble_with_id(SRC, DST, 1500, 1);
        pkt[9] = 17;
        assert_eq!(decode(&pkt), Err(DecodeError::NotIcmp(17)));
    }

    #[test]
    fn detects_corruption() {
        let mut pkt = assemble_with_id(SRC, DST, 1500, 1);
        pkt[8] = 1;
        assert_eq!(decode(&pkt), Err(DecodeError::BadChecksum("cabeçalho IPv4")));

        let mut pkt = assemble_with_id(SRC, DST, 1500, 1);
        pkt[27] ^= 0xFF;
        assert_eq!(decode(&pkt), Err(DecodeError::BadChecksum("ICMP")));
    }

    #[test]
    fn hex_dump_layout() {
        let dump = hex_dump(&[0u8; 18]);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000: 00 00"));
        assert_eq!(lines[1], "0010: 00 00");
    }
}
