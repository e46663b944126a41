use crate::record::{ConnectionRecord, Endpoint};

/// `-a` all sockets, `-p` owning process, `-n` numeric, `-t`/`-u` TCP and UDP.
pub const ARGS: &[&str] = &["-apntu"];

pub fn parse(output: &str) -> Vec<ConnectionRecord> {
    output.lines().filter_map(parse_line).collect()
}

// Proto Recv-Q Send-Q Local-Address Foreign-Address [State] [PID/Program name]
fn parse_line(line: &str) -> Option<ConnectionRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return None;
    }
    let proto = parts[0];
    if !proto.starts_with("tcp") && !proto.starts_with("udp") {
        return None;
    }

    let local = Endpoint::parse(parts[3])?;
    let remote = Endpoint::parse(parts[4])?;

    // UDP sockets usually leave the state column blank.
    let (state, rest) = match parts.get(5) {
        Some(col) if !is_pid_column(col) => (Some((*col).to_string()), &parts[6..]),
        _ => (None, &parts[5..]),
    };
    let (pid, process_name) = parse_pid_program(&rest.join(" "));

    Some(ConnectionRecord {
        proto: proto.to_string(),
        local,
        remote,
        state,
        pid,
        process_name,
    })
}

fn is_pid_column(col: &str) -> bool {
    if col == "-" {
        return true;
    }
    match col.split_once('/') {
        Some((pid, _)) => !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

fn parse_pid_program(col: &str) -> (Option<u32>, Option<String>) {
    let Some((pid, name)) = col.split_once('/') else {
        return (None, None);
    };
    let name = name.trim();
    (
        pid.parse().ok(),
        (!name.is_empty()).then(|| name.to_string()),
    )
}
