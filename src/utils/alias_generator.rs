//! Random alias generation.
//!
//! Aliases are drawn uniformly from a fixed alphabet. Uniqueness is not checked
//! here; the storage layer rejects duplicates with
//! [`crate::error::StorageError::UrlExists`].

use rand::Rng;
use thiserror::Error;

/// Default alphabet: ASCII letters and digits.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated aliases unless configured otherwise.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Invalid generator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("alias length must be greater than zero")]
    ZeroLength,

    #[error("alias alphabet must not be empty")]
    EmptyAlphabet,
}

/// Generates random aliases of a fixed length.
#[derive(Debug, Clone)]
pub struct AliasGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl AliasGenerator {
    /// Creates a generator over the distinct characters of `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::ZeroLength`] if `length` is zero and
    /// [`AliasError::EmptyAlphabet`] if `alphabet` has no characters.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, AliasError> {
        if length == 0 {
            return Err(AliasError::ZeroLength);
        }

        let mut chars: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }

        if chars.is_empty() {
            return Err(AliasError::EmptyAlphabet);
        }

        Ok(Self {
            alphabet: chars,
            length,
        })
    }

    /// Length of every alias this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if `c` belongs to the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }

    /// Generates one alias.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_ALIAS_LENGTH,
        }
    }
}

/// Generates an alias of `length` characters from [`DEFAULT_ALPHABET`].
///
/// # Errors
///
/// Returns [`AliasError::ZeroLength`] if `length` is zero.
///
/// # Examples
///
/// ```
/// use link_shortener::utils::alias_generator::generate_alias;
///
/// let alias = generate_alias(6).unwrap();
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> Result<String, AliasError> {
    AliasGenerator::new(DEFAULT_ALPHABET, length).map(|generator| generator.generate())
}
