/// Valid port range for gateway forwarding rules.
pub const GATEWAY_PORT_MIN: i64 = 1;
pub const GATEWAY_PORT_MAX: i64 = 65_535;

pub fn is_valid_gateway_port(port: i64) -> bool {
    (GATEWAY_PORT_MIN..=GATEWAY_PORT_MAX).contains(&port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_bounds() {
        assert!(is_valid_gateway_port(1));
        assert!(is_valid_gateway_port(65_535));
        assert!(!is_valid_gateway_port(0));
        assert!(!is_valid_gateway_port(70_000));
    }
}
