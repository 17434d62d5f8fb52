/// Calcula o checksum da Internet (RFC 1071) usado pelo IPv4 e pelo ICMP.
///
/// O campo de checksum dentro de `data` deve estar zerado antes da chamada;
/// escrever o resultado de volta é responsabilidade de quem chama.
pub fn checksum(mut data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    while data.len() >= 2 {
        sum = sum.wrapping_add(u16::from_be_bytes([data[0], data[1]]) as u32);
        data = &data[2..];
    }
    // Byte ímpar: vira o byte alto de uma palavra completada com zero
    if let [last] = data {
        sum = sum.wrapping_add((*last as u32) << 8);
    }
    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

/// Grava `csum` em big-endian a partir de `offset`.
pub(crate) fn write_checksum(buf: &mut [u8], offset: usize, csum: u16) {
    buf[offset..offset + 2].copy_from_slice(&csum.to_be_bytes());
}
