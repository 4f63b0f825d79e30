use regex_to_dfa::converter::{convert_request, Response};
use regex_to_dfa::error_handling::{Error, Result};
use regex_to_dfa::record::AutomatonRecord;
use regex_to_dfa::{convert, ConversionResult};

use std::collections::HashSet;

fn accepts(record: &AutomatonRecord, input: &str) -> bool {
    let mut state = record.start.as_str();
    for c in input.chars() {
        match record.get_next_state(state, &c.to_string()) {
            Some(next) => state = next,
            None => return false,
        }
    }
    record.is_accepting(state)
}

fn both_accept(result: &ConversionResult, input: &str) -> bool {
    let dfa = accepts(&result.dfa, input);
    assert_eq!(
        dfa,
        accepts(&result.minimized_dfa, input),
        "minimized DFA disagrees on {:?}",
        input
    );
    dfa
}

#[test]
fn test_single_literal() -> Result<()> {
    let result = convert("a")?;
    assert_eq!(result.postfix, "a");
    assert_eq!(result.dfa.states.len(), 2);
    assert_eq!(result.dfa.transitions.len(), 1);
    assert_eq!(result.dfa.transitions[0].symbol, "a");
    assert_eq!(result.dfa.accepting.len(), 1);
    assert!(both_accept(&result, "a"));
    assert!(false == both_accept(&result, ""));
    assert!(false == both_accept(&result, "aa"));
    Ok(())
}

#[test]
fn test_alternation() -> Result<()> {
    let result = convert("a|b")?;
    assert_eq!(result.postfix, "ab|");
    assert!(both_accept(&result, "a"));
    assert!(both_accept(&result, "b"));
    assert!(false == both_accept(&result, ""));
    assert!(false == both_accept(&result, "ab"));
    assert!(false == both_accept(&result, "ba"));

    assert_eq!(result.minimized_dfa.states, vec!["q0", "q1"]);
    assert_eq!(result.minimized_dfa.start, "q0");
    assert_eq!(result.minimized_dfa.accepting, vec!["q1"]);
    Ok(())
}

#[test]
fn test_kleene_star() -> Result<()> {
    let result = convert("a*")?;
    assert!(result.dfa.accepting.contains(&result.dfa.start));
    for input in ["", "a", "aa", "aaaaaaa"] {
        assert!(both_accept(&result, input), "{:?}", input);
    }
    assert_eq!(result.minimized_dfa.states.len(), 1);
    Ok(())
}

#[test]
fn test_star_of_alternation_then_literal() -> Result<()> {
    let result = convert("(a|b)*c")?;
    assert_eq!(result.alphabet, vec!["a", "b", "c"]);
    assert_eq!(result.dfa.symbols, result.alphabet);
    for input in ["c", "ac", "bc", "abababbc", "bbbbc"] {
        assert!(both_accept(&result, input), "{:?}", input);
    }
    for input in ["", "a", "ab", "cc", "acb", "cac"] {
        assert!(false == both_accept(&result, input), "{:?}", input);
    }
    Ok(())
}

#[test]
fn test_blank_input_is_rejected_before_conversion() {
    assert!(matches!(convert_request(""), Err(Error::EmptyInput)));
    assert!(matches!(convert_request("   "), Err(Error::EmptyInput)));
    let response = Response::handle("");
    assert!(false == response.is_success());
    assert_eq!(response.status_code(), 400);
}

#[test]
fn test_malformed_expressions() {
    for regex in ["(a", "a)", ")a", "*a", "a||b", "|a", "a|", "()", "a+b", "a?", "[ab]"] {
        match convert(regex) {
            Err(Error::MalformedExpression(_)) => {}
            other => panic!("{:?} should be malformed, got {:?}", regex, other.map(|r| r.postfix)),
        }
    }
}

#[test]
fn test_precedence_and_implicit_concatenation() -> Result<()> {
    assert_eq!(convert("a|b*")?.postfix, "ab*|");
    assert_eq!(convert("ab")?.postfix, convert("a.b")?.postfix);

    let result = convert("ab*|c")?;
    for input in ["a", "ab", "abbb", "c"] {
        assert!(both_accept(&result, input), "{:?}", input);
    }
    for input in ["", "b", "ac", "abc"] {
        assert!(false == both_accept(&result, input), "{:?}", input);
    }
    Ok(())
}

#[test]
fn test_conversion_is_repeatable() -> Result<()> {
    for regex in ["a", "(a|b)*c", "(ab|ba)*a*", "x(y|z)*x"] {
        assert_eq!(convert(regex)?, convert(regex)?);
    }
    Ok(())
}

#[test]
fn test_transition_ids_and_determinism() -> Result<()> {
    let result = convert("(a|b)*abb")?;
    for record in [&result.dfa, &result.minimized_dfa] {
        let mut seen = HashSet::new();
        for t in &record.transitions {
            assert_eq!(t.id, format!("{}_{}_{}", t.from, t.to, t.symbol));
            assert!(seen.insert((t.from.clone(), t.symbol.clone())));
            assert!(record.states.contains(&t.from));
            assert!(record.states.contains(&t.to));
        }
        let mut sorted = record.states.clone();
        sorted.sort();
        assert_eq!(sorted, record.states);
    }
    assert_eq!(result.minimized_dfa.states.len(), 4);
    Ok(())
}

#[test]
fn test_unicode_alphanumerics() -> Result<()> {
    let result = convert("é|1")?;
    assert_eq!(result.alphabet, vec!["1", "é"]);
    assert!(both_accept(&result, "é"));
    assert!(both_accept(&result, "1"));
    Ok(())
}
