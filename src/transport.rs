// Criação e configuração de sockets de baixo nível
use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use std::net::{Ipv4Addr, SocketAddrV4};

use tracing::debug;

use crate::error::PtbError;

// IPPROTO_RAW (255). Valor direto porque libc não o expõe no Windows.
const IPPROTO_RAW: i32 = 255;

/// Qualquer coisa capaz de colocar um datagrama IPv4 completo na rede.
pub trait Transport {
    fn send(&self, src: Ipv4Addr, dst: Ipv4Addr, packet: &[u8]) -> Result<(), PtbError>;
}

/// Socket RAW com IP_HDRINCL: o kernel envia o cabeçalho IP que montamos.
/// Requer root/CAP_NET_RAW (ou Administrador no Windows).
pub struct RawSocketTransport {
    socket: Socket,
    src: Ipv4Addr,
}

impl RawSocketTransport {
    /// Cria o socket e o associa ao endereço de origem (porta 0).
    pub fn bind(src: Ipv4Addr) -> Result<Self, PtbError> {
        // IPPROTO_RAW: só envio, o protocolo real vem do nosso cabeçalho
        let socket = Socket::new(
            Domain::IPV4,
            Type::RAW,
            Some(Protocol::from(IPPROTO_RAW)),
        )
        .map_err(PtbError::TransmissionFailed)?;

        socket
            .set_header_included_v4(true)
            .map_err(PtbError::TransmissionFailed)?;

        socket
            .bind(&SockAddr::from(SocketAddrV4::new(src, 0)))
            .map_err(PtbError::TransmissionFailed)?;

        debug!(%src, "raw socket pronto (IP_HDRINCL)");

        Ok(Self { socket, src })
    }
}

impl Transport for RawSocketTransport {
    fn send(&self, src: Ipv4Addr, dst: Ipv4Addr, packet: &[u8]) -> Result<(), PtbError> {
        check_source(self.src, src)?;

        // A porta é ignorada para ICMP; o kernel roteia pelo cabeçalho
        let dst_sa = SockAddr::from(SocketAddrV4::new(dst, 0));

        let n = self
            .socket
            .send_to(packet, &dst_sa)
            .map_err(PtbError::TransmissionFailed)?;

        if n != packet.len() {
            return Err(PtbError::TransmissionFailed(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("envio parcial: {n} de {} bytes", packet.len()),
            )));
        }

        debug!(%src, %dst, bytes = n, "pacote enviado");
        Ok(())
    }
}

/// O socket fica associado à origem do `bind`; outra origem seria enviada
/// com o endereço errado na rota de saída.
fn check_source(bound: Ipv4Addr, src: Ipv4Addr) -> Result<(), PtbError> {
    if bound != src {
        return Err(PtbError::TransmissionFailed(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("origem {src} difere do endereço do socket {bound}"),
        )));
    }
    Ok(())
}
