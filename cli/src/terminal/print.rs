use colored::*;
use lanid_core::discovered::DiscoveredHost;
use std::net::IpAddr;

pub fn header(title: &str) {
    println!("{} {}", "::".cyan().bold(), title.bold());
}

pub fn host_row(addr: IpAddr, entry: &DiscoveredHost) {
    let addr = format!("{:<40}", addr.to_string());
    println!(
        "  {} {:<32} {}",
        addr.green(),
        entry.host,
        format!("[{}]", entry.source.as_str()).dimmed()
    );
}

pub fn summary(count: usize) {
    let unit = if count == 1 { "host" } else { "hosts" };
    println!("{} {count} {unit} in the directory", "::".cyan().bold());
}
