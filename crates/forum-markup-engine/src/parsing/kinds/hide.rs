use crate::parsing::marker::Attributes;

/// `[hide=100]` hides the body until the reader has 100 posts; `[hide]`
/// hides it from guests only. A non-numeric value is ignored.
pub fn threshold(attrs: &Attributes) -> Option<u32> {
    let raw = attrs.value.as_deref()?;
    let parsed = raw.trim().parse::<u32>().ok();
    if parsed.is_none() {
        log::debug!("ignoring non-numeric hide threshold {raw:?}");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("100"), Some(100))]
    #[case(Some(" 5 "), Some(5))]
    #[case(Some("many"), None)]
    #[case(Some("-1"), None)]
    fn thresholds(#[case] value: Option<&str>, #[case] expected: Option<u32>) {
        let attrs = Attributes {
            value: value.map(str::to_string),
            pairs: Vec::new(),
        };
        assert_eq!(threshold(&attrs), expected);
    }
}
