use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeLevel {
    /// Pode abrir socket RAW (root).
    Full,
    /// Provavelmente não pode; o erro real vem da criação do socket.
    Unprivileged,
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeLevel::Full => write!(f, "privilegiado (socket RAW)"),
            PrivilegeLevel::Unprivileged => write!(f, "sem privilégios"),
        }
    }
}

/// Verifica se o processo roda como root. CAP_NET_RAW não é consultado,
/// então um binário com a capability aparece como `Unprivileged`.
pub fn check_privileges() -> PrivilegeLevel {
    #[cfg(unix)]
    {
        if unsafe { libc::geteuid() } == 0 {
            return PrivilegeLevel::Full;
        }
        PrivilegeLevel::Unprivileged
    }
    #[cfg(not(unix))]
    {
        PrivilegeLevel::Unprivileged
    }
}
