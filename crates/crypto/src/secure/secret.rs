//! Secret wrapper utilities

use secrecy::{SecretBox, SecretString as SecrecySecretString};

/// A secret byte buffer that is zeroized on drop.
///
/// Holds seed material such as a normalized recovery phrase. The inner value
/// can only be accessed via `expose_secret()`.
pub type SecretBytes = SecretBox<Vec<u8>>;

/// A secret string that is zeroized on drop.
pub type SecretString = SecrecySecretString;

/// Extension trait for moving a plain value into its secret wrapper.
pub trait IntoSecret {
    /// The secret type this converts into.
    type Secret;

    /// Convert into a secret value.
    fn into_secret(self) -> Self::Secret;
}

impl IntoSecret for String {
    type Secret = SecretString;

    fn into_secret(self) -> Self::Secret {
        self.into()
    }
}

impl IntoSecret for Vec<u8> {
    type Secret = SecretBytes;

    fn into_secret(self) -> Self::Secret {
        SecretBox::new(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_into_secret_string() {
        let secret = "my-secret".to_string().into_secret();
        let exposed: &str = secret.expose_secret();
        assert_eq!(exposed, "my-secret");
    }

    #[test]
    fn test_into_secret_bytes() {
        let secret = vec![1u8, 2, 3].into_secret();
        assert_eq!(secret.expose_secret(), &vec![1, 2, 3]);
        assert!(!format!("{:?}", secret).contains("1, 2, 3"));
    }
}
