use crate::error::Result;
use crate::hash::Hash;
use crate::journal;
use crate::repo::Repo;
use crate::types::CommitRecord;

/// commit record with its object hash for log output
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub hash: Hash,
    pub record: CommitRecord,
}

/// full commit history, ascending index order
pub fn log(repo: &Repo) -> Result<Vec<LogEntry>> {
    let hashes = journal::read_index(repo)?;
    let records = journal::all_commits(repo)?;

    Ok(hashes
        .into_iter()
        .zip(records)
        .map(|(hash, record)| LogEntry { hash, record })
        .collect())
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "commit {}  ({})", self.record.index, self.hash.short_hex())?;
        writeln!(f, "Date:  {}", format_timestamp(self.record.timestamp))?;
        writeln!(f)?;
        for line in self.record.message.lines() {
            writeln!(f, "    {}", line)?;
        }
        writeln!(f)?;
        for name in self.record.file_names() {
            writeln!(f, "    {}", name)?;
        }
        Ok(())
    }
}

/// render a unix timestamp as UTC `YYYY-MM-DD HH:MM:SS`
///
/// civil-date conversion per the days-from-epoch identity; leap years
/// handled exactly, no date crate needed for one format.
fn format_timestamp(timestamp: i64) -> String {
    let days = timestamp.div_euclid(86_400);
    let secs_of_day = timestamp.rem_euclid(86_400);

    // shift epoch from 1970-01-01 to 0000-03-01 so leap days land at
    // the end of the cycle
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60
    )
}
