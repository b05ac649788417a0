//! Extension traits for std types.

pub trait PushIfSome<T> {
    /// Appends `item` only when it is `Some`.
    fn push_if_some(&mut self, item: Option<T>);
}

impl<T> PushIfSome<T> for Vec<T> {
    fn push_if_some(&mut self, item: Option<T>) {
        if let Some(item) = item {
            self.push(item);
        }
    }
}

const MAX_DECIMALS: u8 = 9;
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: u8,
    pub grouping: Option<char>,
    pub decimal_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 2,
            grouping: Some(','),
            decimal_separator: '.',
        }
    }
}

impl CurrencyFormat {
    /// Formats `value`, rounding half away from zero. At most nine decimals are shown.
    ///
    /// Amounts of 2^53 minor units or more show every whole digit and a zero fraction.
    /// Non-finite values format as their plain text form with the symbol prepended.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format!("{}{value}", self.symbol);
        }

        let decimals = self.decimals.min(MAX_DECIMALS);
        let scale = 10u64.pow(decimals as u32);
        let scaled = (value.abs() * scale as f64).round();
        let (whole, frac) = if scaled < EXACT_INTEGER_LIMIT {
            let minor = scaled as u64;
            ((minor / scale).to_string(), minor % scale)
        } else {
            // Minor units past 2^53 are not exact integers; keep the whole part only.
            (format!("{:.0}", value.abs().trunc()), 0)
        };
        let negative = value < 0.0 && scaled != 0.0;

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_digits(&whole, self.grouping));
        if decimals > 0 {
            out.push(self.decimal_separator);
            out.push_str(&format!("{frac:0width$}", width = decimals as usize));
        }
        out
    }
}

fn group_digits(digits: &str, separator: Option<char>) -> String {
    let Some(sep) = separator else {
        return digits.to_string();
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

pub trait FormatCurrency {
    fn format_currency(&self) -> String;

    fn format_currency_with(&self, format: &CurrencyFormat) -> String;
}

impl FormatCurrency for f64 {
    fn format_currency(&self) -> String {
        self.format_currency_with(&CurrencyFormat::default())
    }

    fn format_currency_with(&self, format: &CurrencyFormat) -> String {
        format.format(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_if_some_skips_none() {
        let mut items: Vec<&str> = Vec::new();
        items.push_if_some(None);
        assert!(items.is_empty());
        items.push_if_some(Some("some string"));
        assert_eq!(items, ["some string"]);
    }

    #[test]
    fn formats_dollars_and_cents() {
        assert_eq!(1.2333333333_f64.format_currency(), "$1.23");
        assert_eq!(0.0_f64.format_currency(), "$0.00");
        assert_eq!(1234567.891_f64.format_currency(), "$1,234,567.89");
        assert_eq!((-3.1_f64).format_currency(), "-$3.10");
        assert_eq!((-0.001_f64).format_currency(), "$0.00");
    }

    #[test]
    fn custom_format() {
        let euro = CurrencyFormat {
            symbol: "€".to_string(),
            decimals: 0,
            grouping: Some('.'),
            decimal_separator: ',',
        };
        assert_eq!(9999.5_f64.format_currency_with(&euro), "€10.000");
    }

    #[test]
    fn huge_amounts_keep_every_digit() {
        assert_eq!(
            1e20_f64.format_currency(),
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(
            (-2.5e18_f64).format_currency(),
            "-$2,500,000,000,000,000,000.00"
        );
    }
}
