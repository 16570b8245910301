use hchart_protocol::TextMeasure;

use crate::model::FrameName;

/// Keep the first character of each namespace segment:
/// `com.example.Foo` becomes `c.e.F`.
pub fn abbreviate(namespace: &str, separator: &str) -> String {
    namespace
        .split(separator)
        .filter_map(|segment| segment.chars().next())
        .map(String::from)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Label representations from longest to shortest: fully-qualified,
/// abbreviated namespace, bare name.
pub fn candidates(name: &FrameName, separator: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(3);
    if !name.namespace.is_empty() {
        out.push(name.qualified(separator));
        out.push(format!(
            "{}{separator}{}",
            abbreviate(&name.namespace, separator),
            name.name
        ));
    }
    out.push(name.name.clone());
    out
}

/// The first candidate whose measured width is strictly below `available`.
pub fn fit<'a, M: TextMeasure + ?Sized>(
    measure: &M,
    candidates: &'a [String],
    available: f64,
) -> Option<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .find(|text| !text.is_empty() && measure.text_width(text) < available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hchart_protocol::FontMetrics;

    struct Fixed(f64);

    impl TextMeasure for Fixed {
        fn text_width(&self, text: &str) -> f64 {
            text.chars().count() as f64 * self.0
        }

        fn font_metrics(&self) -> FontMetrics {
            FontMetrics::new(8.0, 2.0)
        }
    }

    #[test]
    fn abbreviates_each_segment() {
        assert_eq!(abbreviate("com.example.Foo", "."), "c.e.F");
        assert_eq!(abbreviate("std::vector", "::"), "s::v");
        assert_eq!(abbreviate("", "."), "");
    }

    #[test]
    fn candidates_in_priority_order() {
        let name = FrameName::new("com.example.Foo", "bar");
        assert_eq!(
            candidates(&name, "."),
            vec!["com.example.Foo.bar", "c.e.F.bar", "bar"]
        );
        assert_eq!(candidates(&FrameName::new("", "main"), "."), vec!["main"]);
    }

    #[test]
    fn fit_picks_longest_that_fits() {
        let list = candidates(&FrameName::new("com.example.Foo", "bar"), ".");
        let m = Fixed(1.0);
        assert_eq!(fit(&m, &list, 100.0), Some("com.example.Foo.bar"));
        assert_eq!(fit(&m, &list, 19.0), Some("c.e.F.bar"));
        assert_eq!(fit(&m, &list, 9.0), Some("bar"));
        // Strictly less than: exactly 3 wide does not fit in 3.
        assert_eq!(fit(&m, &list, 3.0), None);
    }
}
