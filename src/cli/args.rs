use super::CliError;

/// A `--name` option a command accepts, and whether it takes a value.
#[derive(Clone, Copy, Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    pub takes_value: bool,
}

impl OptionSpec {
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            takes_value: true,
        }
    }

    pub const fn switch(name: &'static str) -> Self {
        Self {
            name,
            takes_value: false,
        }
    }
}

/// Positional arguments and options split out of a command's tokens.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: Vec<(&'static str, Option<&'a str>)>,
}

impl<'a> ParsedArgs<'a> {
    /// Accepts `--name value`, `--name=value` and bare switches. Options not
    /// listed in `specs` are rejected.
    pub fn parse(tokens: &[&'a str], specs: &[OptionSpec]) -> Result<Self, CliError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = tokens.iter().copied();
        while let Some(token) = iter.next() {
            let Some(raw) = token.strip_prefix("--") else {
                parsed.positional.push(token);
                continue;
            };
            let (name, inline) = match raw.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (raw, None),
            };
            let spec = specs
                .iter()
                .find(|spec| spec.name == name)
                .ok_or_else(|| CliError::InvalidArguments(format!("unknown option `--{name}`")))?;

            let value = match (spec.takes_value, inline) {
                (true, Some(value)) => Some(value),
                (true, None) => Some(iter.next().ok_or_else(|| {
                    CliError::InvalidArguments(format!("option `--{name}` needs a value"))
                })?),
                (false, None) => None,
                (false, Some(_)) => {
                    return Err(CliError::InvalidArguments(format!(
                        "option `--{name}` does not take a value"
                    )))
                }
            };
            parsed.options.push((spec.name, value));
        }
        Ok(parsed)
    }

    pub fn has(&self, name: &str) -> bool {
        self.options.iter().any(|(option, _)| *option == name)
    }

    /// Last value given for `name`.
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(option, _)| *option == name)
            .and_then(|(_, value)| *value)
    }
}
