use anyhow::bail;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartFrom {
    #[default]
    Beginning,
    Latest,
    Id(String),
}

impl FromStr for StartFrom {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "beginning" | "0" => Ok(StartFrom::Beginning),
            "latest" | "$" => Ok(StartFrom::Latest),
            id if is_entry_id(id) => Ok(StartFrom::Id(id.to_owned())),
            other => bail!(
                "Invalid start position '{}', expected 'beginning', 'latest' or an entry id",
                other
            ),
        }
    }
}

fn is_entry_id(value: &str) -> bool {
    let mut parts = value.splitn(2, '-');
    let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match (parts.next(), parts.next()) {
        (Some(ms), None) => is_number(ms),
        (Some(ms), Some(seq)) => is_number(ms) && is_number(seq),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_positions() -> Result<(), anyhow::Error> {
        assert_eq!("beginning".parse::<StartFrom>()?, StartFrom::Beginning);
        assert_eq!("latest".parse::<StartFrom>()?, StartFrom::Latest);
        assert_eq!("$".parse::<StartFrom>()?, StartFrom::Latest);

        Ok(())
    }

    #[test]
    fn parses_entry_ids() -> Result<(), anyhow::Error> {
        assert_eq!(
            "1526919030474-55".parse::<StartFrom>()?,
            StartFrom::Id("1526919030474-55".to_owned())
        );
        assert_eq!(
            "1526919030474".parse::<StartFrom>()?,
            StartFrom::Id("1526919030474".to_owned())
        );

        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!("yesterday".parse::<StartFrom>().is_err());
        assert!("12-".parse::<StartFrom>().is_err());
        assert!("-1".parse::<StartFrom>().is_err());
    }
}
