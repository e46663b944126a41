use std::net::IpAddr;

use crate::record::{ConnectionRecord, Endpoint};

/// Same selection as the netstat call; `-H` drops the header line.
pub const ARGS: &[&str] = &["-tunapH"];

pub fn parse(output: &str) -> Vec<ConnectionRecord> {
    output.lines().filter_map(parse_line).collect()
}

// Netid State Recv-Q Send-Q Local:Port Peer:Port [Process]
fn parse_line(line: &str) -> Option<ConnectionRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 6 {
        return None;
    }
    let proto = parts[0];
    if !proto.starts_with("tcp") && !proto.starts_with("udp") {
        return None;
    }

    let local = Endpoint::parse(parts[4])?;
    let remote = Endpoint::parse(parts[5])?;
    let (pid, process_name) = parse_users(&parts[6..].join(" "));

    Some(ConnectionRecord {
        proto: family_proto(proto, &local),
        local,
        remote,
        state: normalize_state(parts[1]),
        pid,
        process_name,
    })
}

/// ss prints `tcp`/`udp` for both families; netstat appends `6` for IPv6.
fn family_proto(netid: &str, local: &Endpoint) -> String {
    match local.address {
        Some(IpAddr::V6(_)) if !netid.ends_with('6') => format!("{netid}6"),
        _ => netid.to_string(),
    }
}

/// Maps ss state names onto the netstat spelling.
fn normalize_state(state: &str) -> Option<String> {
    let mapped = match state {
        "UNCONN" => return None,
        "ESTAB" => "ESTABLISHED".to_string(),
        "FIN-WAIT-1" => "FIN_WAIT1".to_string(),
        "FIN-WAIT-2" => "FIN_WAIT2".to_string(),
        other => other.replace('-', "_"),
    };
    Some(mapped)
}

// users:(("sshd",pid=812,fd=3),("sshd",pid=813,fd=3))
fn parse_users(col: &str) -> (Option<u32>, Option<String>) {
    let Some(start) = col.find("((\"") else {
        return (None, None);
    };
    let entry = &col[start + 3..];
    let name = entry.split_once('"').map(|(name, _)| name.to_string());
    let pid = entry.find("pid=").and_then(|i| {
        let digits: String = entry[i + 4..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    });
    (pid, name)
}
