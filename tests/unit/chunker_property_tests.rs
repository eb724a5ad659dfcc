/*!
 * Property tests for the chunker.
 *
 * Documents are built from fragments that stress the delimiters: fences,
 * dollars, backslashes, tags, mixed line endings and multibyte text.
 */

use proptest::prelude::*;

use rosetta::chunking::{self, reassemble};

const FRAGMENTS: [&str; 26] = [
    "```", "~~~", "`", "``", "$", "$$", "\\", "<", ">", "<div>", "</div>", "<svg width=\"1\">", "</svg>",
    "<br/>", "<https://a.example>", "\n", "\r\n", "\r", " ", "x", "a b", "5", "=^", "é", "数学", "🙂",
];

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 0..60).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn test_reassemble_withIdentity_shouldReproduceAnyInput(input in document_strategy()) {
        let doc = chunking::parse(&input);
        prop_assert_eq!(reassemble(&doc, |text| text.to_string()), input);
    }

    #[test]
    fn test_parse_withIdentityOutput_shouldBeIdempotent(input in document_strategy()) {
        let doc = chunking::parse(&input);
        let again = chunking::parse(&reassemble(&doc, |text| text.to_string()));
        prop_assert_eq!(again, doc);
    }

    #[test]
    fn test_parse_withAnyInput_shouldEmitNonEmptyChunksInLineOrder(input in document_strategy()) {
        let doc = chunking::parse(&input);
        prop_assert!(doc.iter().all(|c| !c.text.is_empty()));
        prop_assert!(doc.chunks().windows(2).all(|w| w[0].line <= w[1].line));
    }
}
