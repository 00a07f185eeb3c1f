//! Style contracts sent to the model as the system message

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::errors::{RelayError, Result};

/// Permissive contract: corpus expressions allowed
const CORPUS_PROMPT: &str = "\
Eres un traductor experto entre ESPAÑOL y QUECHUA BOLIVIANO CASTELLANIZADO (estilo JW).

Reglas:
- Traduce de manera fiel, respetando el sentido original.
- No agregues ideas, no interpretes significados ocultos.
- No cambies palabras por conceptos como “propósito”, “provisión espiritual”, etc.
- Mantén un estilo natural y respetuoso, similar al usado en publicaciones de JW.
- Si el texto está en español, tradúcelo al quechua castellanizado.
- Si el texto está en quechua castellanizado, tradúcelo al español.
- Usa expresiones usadas en tu corpus: imaynalla, hermanoy, wawquey, kusisqa, yanapaynin, etc.
- La traducción debe sonar natural, pero siempre fiel al contenido original.
- No expliques lo que haces. Devuelve solo la traducción.
";

/// Strict contract: nothing beyond the source text
const LITERAL_PROMPT: &str = "\
Eres un traductor literal entre ESPAÑOL y QUECHUA BOLIVIANO CASTELLANIZADO.

Reglas estrictas:
- Traduce palabra por palabra cuando sea posible, conservando el orden de las ideas.
- No agregues NADA que no esté en el texto original: ni ideas, ni saludos, ni aclaraciones.
- No uses términos cariñosos (hermanoy, mamitay, wawitay, etc.) si no aparecen en el original.
- No interpretes, no resumas, no suavices el contenido.
- Si el texto está en español, tradúcelo al quechua castellanizado.
- Si el texto está en quechua castellanizado, tradúcelo al español.
- No expliques lo que haces. Devuelve solo la traducción.

Ejemplos de correspondencia:
- \"Buenos días\" → \"Allin p'unchay\"
- \"¿Cómo estás?\" → \"¿Imaynalla kashanki?\"
- \"Gracias\" → \"Pachi\"
- \"hermano\" → \"wawqey\"
";

/// Named style contract presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Faithful translation with the corpus's customary expressions
    #[default]
    Corpus,
    /// Literal translation, every addition forbidden
    Literal,
}

impl StylePreset {
    /// All presets, in listing order
    pub const ALL: [StylePreset; 2] = [StylePreset::Corpus, StylePreset::Literal];

    /// Instruction text for this preset
    pub fn prompt(&self) -> &'static str {
        match self {
            StylePreset::Corpus => CORPUS_PROMPT,
            StylePreset::Literal => LITERAL_PROMPT,
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            StylePreset::Corpus => "fiel y natural, admite expresiones del corpus",
            StylePreset::Literal => "literal, prohíbe cualquier añadido",
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylePreset::Corpus => write!(f, "corpus"),
            StylePreset::Literal => write!(f, "literal"),
        }
    }
}

impl FromStr for StylePreset {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corpus" => Ok(StylePreset::Corpus),
            "literal" => Ok(StylePreset::Literal),
            other => Err(RelayError::Config {
                message: format!("unknown style preset: {}", other),
            }),
        }
    }
}

/// System instruction injected into every outbound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleContract {
    name: String,
    instructions: String,
}

impl StyleContract {
    /// Contract from a named preset
    pub fn preset(preset: StylePreset) -> Self {
        Self {
            name: preset.to_string(),
            instructions: preset.prompt().to_string(),
        }
    }

    /// Contract from arbitrary text
    pub fn custom(name: impl Into<String>, instructions: impl Into<String>) -> Result<Self> {
        let instructions = instructions.into();
        if instructions.trim().is_empty() {
            return Err(RelayError::Config {
                message: "style contract is empty".to_string(),
            });
        }

        Ok(Self {
            name: name.into(),
            instructions,
        })
    }

    /// Load a contract from a text file, named after the file stem
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let instructions = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());

        Self::custom(name, instructions)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

impl Default for StyleContract {
    fn default() -> Self {
        Self::preset(StylePreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("corpus".parse::<StylePreset>().unwrap(), StylePreset::Corpus);
        assert_eq!(" LITERAL ".parse::<StylePreset>().unwrap(), StylePreset::Literal);
        assert!("poetic".parse::<StylePreset>().is_err());
    }

    #[test]
    fn test_presets_differ_in_strictness() {
        let corpus = StylePreset::Corpus.prompt();
        let literal = StylePreset::Literal.prompt();

        assert_ne!(corpus, literal);
        assert!(corpus.contains("imaynalla"));
        assert!(literal.contains("No uses términos cariñosos"));
        for prompt in [corpus, literal] {
            assert!(prompt.contains("Devuelve solo la traducción"));
        }
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for preset in StylePreset::ALL {
            assert_eq!(preset.to_string().parse::<StylePreset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_contract_from_file() {
        let mut file = tempfile::Builder::new()
            .prefix("formal")
            .suffix(".txt")
            .tempfile()
            .unwrap();
        write!(file, "Traduce sin adornos.").unwrap();

        let contract = StyleContract::from_file(file.path()).unwrap();
        assert!(contract.name().starts_with("formal"));
        assert_eq!(contract.instructions(), "Traduce sin adornos.");
    }

    #[test]
    fn test_empty_contract_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = StyleContract::from_file(file.path()).unwrap_err();
        assert!(matches!(err, RelayError::Config { .. }));
    }

    #[test]
    fn test_default_contract_is_corpus() {
        let contract = StyleContract::default();
        assert_eq!(contract.name(), "corpus");
        assert_eq!(contract.instructions(), CORPUS_PROMPT);
    }
}
