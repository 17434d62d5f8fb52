// Tratamento de erros ergonômico
use anyhow::{Context, Result};

// Gerador da identificação IP
use rand::SeedableRng;
use rand::rngs::StdRng;

// Logs estruturados
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ptbrs::packet;
use ptbrs::parse::{decode, hex_dump};
use ptbrs::privilege::{PrivilegeLevel, check_privileges};
use ptbrs::{RawSocketTransport, Transport};

// Módulos locais
mod args;

/// Programa principal: envia um único ICMP "Packet Too Big" forjado.
/// Requer privilégios de root (ou Administrador no Windows) para o socket RAW.
fn main() -> Result<()> {
    // Parsing de argumentos via módulo args
    let args = args::parse()?;

    // Nível de log: -v controla, RUST_LOG tem precedência
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    // Identificação: fixa (--id), semente (--seed) ou entropia do SO
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pkt = match args.id {
        Some(id) => packet::assemble_with_id(args.src, args.dst, args.mtu, id),
        None => packet::assemble(&mut rng, args.src, args.dst, args.mtu),
    };

    let decoded = decode(&pkt).context("Pacote montado não passou na decodificação")?;
    info!(
        src = %decoded.src,
        dst = %decoded.dst,
        mtu = decoded.next_hop_mtu,
        id = decoded.identification,
        "pacote montado"
    );

    if args.dry_run {
        println!(
            "{} -> {} ICMP type={} code={} next-hop MTU={} id=0x{:04x} ({} bytes):",
            decoded.src,
            decoded.dst,
            decoded.icmp_type,
            decoded.icmp_code,
            decoded.next_hop_mtu,
            decoded.identification,
            pkt.len()
        );
        println!("{}", hex_dump(&pkt));
        return Ok(());
    }

    let level = check_privileges();
    debug!(%level, "privilégios detectados");
    if level == PrivilegeLevel::Unprivileged {
        warn!("processo sem root; a criação do socket RAW provavelmente vai falhar");
    }

    // Cria o socket RAW com IP_HDRINCL associado à origem
    let transport = RawSocketTransport::bind(args.src)
        .context("Falha ao preparar socket RAW. Verifique se está rodando como root.")?;

    transport
        .send(args.src, args.dst, &pkt)
        .with_context(|| format!("Falha ao enviar para {}", args.dst))?;

    println!(
        "ICMP 'Packet Too Big' enviado de {} para {} (next-hop MTU={})",
        args.src, args.dst, args.mtu
    );

    Ok(())
}
