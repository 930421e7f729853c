/// Log-returns for one ticker, oldest first, with undefined values removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Builds a series from raw values, dropping NaN and infinite entries.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            values: values.into_iter().filter(|v| v.is_finite()).collect(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<f64> for ReturnSeries {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

/// Return series keyed by ticker, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnMatrix {
    columns: Vec<(String, ReturnSeries)>,
}

impl ReturnMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column. An existing ticker keeps its position and gets the new series.
    pub fn insert(&mut self, ticker: impl Into<String>, series: ReturnSeries) {
        let ticker = ticker.into();
        match self.columns.iter_mut().find(|(t, _)| *t == ticker) {
            Some((_, existing)) => *existing = series,
            None => self.columns.push((ticker, series)),
        }
    }

    pub fn get(&self, ticker: &str) -> Option<&ReturnSeries> {
        self.columns
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReturnSeries)> {
        self.columns.iter().map(|(t, s)| (t.as_str(), s))
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.columns.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ReturnSeries)> for ReturnMatrix {
    fn from_iter<T: IntoIterator<Item = (S, ReturnSeries)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (ticker, series) in iter {
            out.insert(ticker, series);
        }
        out
    }
}
