use quill_tree::CasingClass;

/// Splits a raw name into lowercase words.
///
/// Word boundaries are non-alphanumeric separators, lower-to-upper
/// transitions, and the last upper of an acronym run (`HTTPServer` splits as
/// `http`, `server`).
fn split_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = raw.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let boundary = if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower)
        } else {
            false
        };

        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Applies a casing transform, preserving a single leading underscore from
/// the original spelling.
pub fn apply(raw: &str, casing: CasingClass) -> String {
    let underscore = raw.starts_with('_') && !raw.starts_with("__");
    let words = split_words(raw);

    let body = match casing {
        CasingClass::Pascal => words.iter().map(|w| capitalize(w)).collect::<String>(),
        CasingClass::Camel => {
            let mut out = String::new();
            for (i, word) in words.iter().enumerate() {
                if i == 0 {
                    out.push_str(word);
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
        CasingClass::Snake => words.join("_"),
        CasingClass::UpperSnake => words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
    };

    if underscore {
        format!("_{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_from_snake_and_camel() {
        assert_eq!(apply("user_profile", CasingClass::Pascal), "UserProfile");
        assert_eq!(apply("userProfile", CasingClass::Pascal), "UserProfile");
        assert_eq!(apply("HTTPServer", CasingClass::Pascal), "HttpServer");
    }

    #[test]
    fn camel_from_mixed() {
        assert_eq!(apply("UserProfile", CasingClass::Camel), "userProfile");
        assert_eq!(apply("user-profile", CasingClass::Camel), "userProfile");
    }

    #[test]
    fn upper_snake() {
        assert_eq!(apply("notFound", CasingClass::UpperSnake), "NOT_FOUND");
        assert_eq!(apply("not_found", CasingClass::UpperSnake), "NOT_FOUND");
    }

    #[test]
    fn single_leading_underscore_survives() {
        assert_eq!(apply("_internal", CasingClass::Camel), "_internal");
        assert_eq!(apply("_internal_id", CasingClass::Pascal), "_InternalId");
    }
}
