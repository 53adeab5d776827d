//! Operator input for the CLI: recovery phrases from a file or a prompt

use anyhow::{anyhow, Context, Result};
use keystone_crypto::{ExposeSecret, SecretString};
use std::fs;
use std::path::Path;

/// Read mnemonic from file or prompt interactively
pub fn get_mnemonic(mnemonic_file: Option<&Path>) -> Result<SecretString> {
    if let Some(file) = mnemonic_file {
        read_mnemonic_from_file(file)
    } else {
        prompt_mnemonic()
    }
}

/// Read mnemonic from a file
///
/// Only emptiness is checked here; wordlist and checksum validation happen
/// during provisioning.
pub fn read_mnemonic_from_file(path: &Path) -> Result<SecretString> {
    let content: SecretString = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mnemonic file: {}", path.display()))?
        .into();

    if content.expose_secret().trim().is_empty() {
        return Err(anyhow!("Mnemonic file is empty"));
    }

    Ok(content)
}

/// Prompt for mnemonic phrase without echoing it
pub fn prompt_mnemonic() -> Result<SecretString> {
    let phrase = rpassword::prompt_password("Enter your bip39 mnemonic: ")
        .context("Failed to read mnemonic")?;

    if phrase.trim().is_empty() {
        return Err(anyhow!("No mnemonic entered"));
    }

    Ok(phrase.into())
}

/// Display warning about mnemonic security
pub fn display_mnemonic_warning(mnemonic: &str) {
    eprintln!();
    eprintln!("============================================================");
    eprintln!("                    IMPORTANT - SAVE THIS!");
    eprintln!("============================================================");
    eprintln!();
    eprintln!("  This phrase is the ONLY way to recover your node and");
    eprintln!("  validator keys. Store it securely offline.");
    eprintln!();

    // Display words in groups of 4 for readability
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    for (i, chunk) in words.chunks(4).enumerate() {
        let start_num = i * 4 + 1;
        let formatted: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(j, word)| format!("{:2}. {:<12}", start_num + j, word))
            .collect();
        eprintln!("  {}", formatted.join("  "));
    }

    eprintln!();
    eprintln!("============================================================");
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_mnemonic_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mnemonic.txt");
        fs::write(&path, "word word\n").unwrap();

        let phrase = read_mnemonic_from_file(&path).unwrap();
        assert_eq!(phrase.expose_secret(), "word word\n");
    }

    #[test]
    fn test_empty_mnemonic_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mnemonic.txt");
        fs::write(&path, "  \n").unwrap();

        assert!(read_mnemonic_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_mnemonic_file_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(read_mnemonic_from_file(&dir.path().join("absent")).is_err());
    }
}
