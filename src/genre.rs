use serde::{Deserialize, Serialize};

/// Above this many degrees Celsius it is pop weather.
const POP_ABOVE: i32 = 25;
/// From this many degrees Celsius up it is rock weather.
const ROCK_FROM: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Pop,
    Rock,
    Classical,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "pop",
            Genre::Rock => "rock",
            Genre::Classical => "classical",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a temperature in degrees Celsius to a genre.
pub fn classify(temperature: i32) -> Genre {
    match temperature {
        t if t > POP_ABOVE => Genre::Pop,
        t if t >= ROCK_FROM => Genre::Rock,
        _ => Genre::Classical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(26), Genre::Pop);
        assert_eq!(classify(25), Genre::Rock);
        assert_eq!(classify(10), Genre::Rock);
        assert_eq!(classify(9), Genre::Classical);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(i32::MAX), Genre::Pop);
        assert_eq!(classify(i32::MIN), Genre::Classical);
        assert_eq!(classify(-13), Genre::Classical);
        assert_eq!(classify(0), Genre::Classical);
    }

    #[test]
    fn test_genre_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Genre::Rock).unwrap(), "\"rock\"");
        assert_eq!(Genre::Classical.to_string(), "classical");
    }
}
