use crate::models::ArticleRanking;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a ranking as CSV with a `rank,article,views` header.
pub fn save_csv<P: AsRef<Path>>(rankings: &[ArticleRanking], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("rank", "article", "views"))?;
    for r in rankings {
        wtr.serialize((r.rank, &r.article, r.views))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a ranking as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rankings: &[ArticleRanking], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rankings)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
