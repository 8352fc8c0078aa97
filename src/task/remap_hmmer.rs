//! Declaring the remap of `hmmscan` results onto transcript coordinates.

use std::path::Path;

use crate::remap;
use crate::task::Action;
use crate::task::RemapJob;
use crate::task::Task;
use crate::task::basename;

/// Declares a remap of the domain table at `domains` using the ORF locations
/// in the GFF3 at `orfs`, writing CSV to `output`.
///
/// # Examples
///
/// ```
/// use hmmremap::remap;
/// use hmmremap::task::remap_hmmer;
///
/// let task = remap_hmmer::task(
///     "orfs.pep.x.Pfam-A.tbl",
///     "longest_orfs.gff3",
///     "orfs.pep.x.Pfam-A.csv",
///     remap::Builder::default(),
/// );
///
/// assert_eq!(task.name(), "remap_hmmer:orfs.pep.x.Pfam-A.tbl");
/// assert_eq!(task.file_deps().len(), 2);
/// assert_eq!(task.targets().len(), 1);
/// ```
pub fn task(
    domains: impl AsRef<Path>,
    orfs: impl AsRef<Path>,
    output: impl AsRef<Path>,
    builder: remap::Builder,
) -> Task {
    let (domains, orfs, output) = (domains.as_ref(), orfs.as_ref(), output.as_ref());

    let job = RemapJob::new(domains, orfs, output, builder);

    Task::new(
        format!("remap_hmmer:{}", basename(domains)),
        Action::Remap(job),
    )
    .file_dep(domains)
    .file_dep(orfs)
    .target(output)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn runs_and_cleans() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("remap_hmmer")?;
        let domains = dir.path().join("orfs.tbl");
        let orfs = dir.path().join("orfs.gff3");
        let output = dir.path().join("orfs.csv");

        fs::write(
            &domains,
            "7tm_1 PF00001.21 268 T1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 39.5 0.1 1 99 \
             15 45 10 50 0.95 -\n",
        )?;
        fs::write(&orfs, "T1\ttransdecoder\tmRNA\t100\t400\t.\t+\t.\tID=T1.p1\n")?;

        let task = task(&domains, &orfs, &output, remap::Builder::default());
        task.run()?;

        let written = fs::read_to_string(&output)?;
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains(",145,235,130,250,"));

        assert_eq!(task.clean()?, vec![output.clone()]);
        assert!(!output.exists());

        Ok(())
    }

    #[test]
    fn missing_input() {
        let task = task(
            "/does/not/exist.tbl",
            "/does/not/exist.gff3",
            "/tmp/never-written.csv",
            remap::Builder::default(),
        );

        assert!(task.run().is_err());
    }
}
