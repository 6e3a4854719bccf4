//! 本机 IP 探测
//!
//! 通过向公网地址发起 UDP connect 获取本机在局域网中的出口地址，
//! 不会真正发送任何数据包。仅用于启动横幅展示。

use std::net::UdpSocket;

/// 返回本机局域网 IP，探测失败时回退到回环地址
pub fn local_ip() -> String {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "127.0.0.1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ip_is_well_formed() {
        // 无论探测成功与否，结果都应能解析为 IP 地址
        let ip = local_ip();
        assert!(ip.parse::<std::net::IpAddr>().is_ok(), "ip: {ip}");
    }
}
