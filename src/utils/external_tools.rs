use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

/// Fails early when `program` cannot be run as blastn.
pub fn check_blastn(program: &str) -> Result<()> {
    let output = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .with_context(|| {
            format!(
                "{} not found. Please install BLAST+ (https://blast.ncbi.nlm.nih.gov/) and ensure it's in your PATH",
                program
            )
        })?;

    if !output.status.success() {
        bail!("{} -version failed with {}", program, output.status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_reported() {
        let err = check_blastn("definitely-not-a-blastn-binary").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
