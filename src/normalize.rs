use std::sync::LazyLock;

use regex::Regex;

/// Synonym rewrites, longest-first so `arcsen` wins over `sen` and `ctg`
/// over `tg`. Anchored so a name is only replaced when no letter
/// precedes or follows it (a digit before `tg` still counts as a break).
static SYNONYMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
  [
    (r"(^|[^A-Za-z])arcsen([^A-Za-z]|$)", "${1}asin${2}"),
    (r"(^|[^A-Za-z])arccos([^A-Za-z]|$)", "${1}acos${2}"),
    (r"(^|[^A-Za-z])arcctg([^A-Za-z]|$)", "${1}acot${2}"),
    (r"(^|[^A-Za-z])arctg([^A-Za-z]|$)", "${1}atan${2}"),
    (r"(^|[^A-Za-z])ctg([^A-Za-z]|$)", "${1}cot${2}"),
    (r"(^|[^A-Za-z])tg([^A-Za-z]|$)", "${1}tan${2}"),
    (r"(^|[^A-Za-z])sen([^A-Za-z]|$)", "${1}sin${2}"),
    (r"(^|[^A-Za-z])ln([^A-Za-z]|$)", "${1}log${2}"),
    (r"(^|[^A-Za-z])Abs([^A-Za-z]|$)", "${1}abs${2}"),
  ]
  .into_iter()
  .map(|(pattern, replacement)| {
    (
      Regex::new(pattern).expect("synonym pattern is valid"),
      replacement,
    )
  })
  .collect()
});

/// Implicit-multiplication insertion points: digit→letter, digit→`(`,
/// letter/`)`→digit, `)(`, and `)`→letter.
static IMPLICIT_PRODUCTS: LazyLock<Vec<(Regex, &'static str)>> =
  LazyLock::new(|| {
    [
      (r"(\d)\s*([A-Za-z(])", "$1*$2"),
      (r"([A-Za-z\)])\s*(\d)", "$1*$2"),
      (r"\)\s*\(", ")*("),
      (r"\)\s*([A-Za-z])", ")*$1"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
      (
        Regex::new(pattern).expect("product pattern is valid"),
        replacement,
      )
    })
    .collect()
  });

/// Rewrite raw input into the form the parser accepts: exponent operator,
/// function-name synonyms, then implicit multiplication. Purely textual
/// and order-sensitive; no validation happens here, garbage passes
/// through for the validator to reject.
pub fn normalize(text: &str) -> String {
  let mut out = text.trim().replace("**", "^");
  for (pattern, replacement) in SYNONYMS.iter() {
    out = replace_to_fixpoint(pattern, replacement, out);
  }
  for (pattern, replacement) in IMPLICIT_PRODUCTS.iter() {
    out = replace_to_fixpoint(pattern, replacement, out);
  }
  out
}

/// Repeat a replacement until it stops changing the text. Needed because
/// a match consumes its boundary character, hiding an adjacent occurrence
/// from the same pass (`tg(tg(x))`).
fn replace_to_fixpoint(
  pattern: &Regex,
  replacement: &str,
  mut text: String,
) -> String {
  loop {
    let replaced = pattern.replace_all(&text, replacement).into_owned();
    if replaced == text {
      return text;
    }
    text = replaced;
  }
}
