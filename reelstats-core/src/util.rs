const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Cache file size for display: whole bytes below 1 KB, then KB or MB with
/// one decimal.
pub fn format_bytes_approx(bytes: u64) -> String {
    match bytes {
        n if n >= MIB => format!("{:.1} MB", n as f64 / MIB as f64),
        n if n >= KIB => format!("{:.1} KB", n as f64 / KIB as f64),
        n => format!("{n} B"),
    }
}
