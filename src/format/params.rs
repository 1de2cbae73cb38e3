use crate::sql::Token;
use std::collections::HashMap;

/// Values substituted for placeholders while formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params {
    /// `?`, `?0`, `?1`, ... by position.
    Positional(Vec<String>),
    /// `:name` / `@name` by key.
    Named(HashMap<String, String>),
}

impl Params {
    fn lookup(&self, key: &str) -> Option<&str> {
        match self {
            Params::Positional(values) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| values.get(index))
                .map(String::as_str),
            Params::Named(values) => values.get(key).map(String::as_str),
        }
    }
}

/// Placeholder replacement over one format run. Unkeyed placeholders consume
/// positions in order.
#[derive(Debug, Clone)]
pub struct ParamCursor<'a> {
    params: Option<&'a Params>,
    index: usize,
}

impl<'a> ParamCursor<'a> {
    pub fn new(params: Option<&'a Params>) -> Self {
        Self { params, index: 0 }
    }

    /// The replacement for `token`, or its own text when no value applies.
    pub fn get(&mut self, token: &Token) -> String {
        let Some(params) = self.params else {
            return token.text.clone();
        };
        let value = match token.key.as_deref().filter(|key| !key.is_empty()) {
            Some(key) => params.lookup(key),
            None => {
                let index = self.index;
                self.index += 1;
                params.lookup(&index.to_string())
            }
        };
        value.map_or_else(|| token.text.clone(), str::to_string)
    }
}
