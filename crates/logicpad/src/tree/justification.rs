//! Rule citations in justification text.
//!
//! A citation is a rule family (`FR` or `TR`), an optional prime (`'` or
//! `′`) and a parenthesized symbol: `FR(~)`, `FR'(∧)`, `TR(v)`. Citations are
//! scanned out of free text; anything between them is ignored.

use std::fmt;

use winnow::{
    Parser as _,
    combinator::{alt, delimited, opt, repeat},
    error::{ContextError, ErrMode},
    token::{any, one_of, take_while},
};

type Input<'a> = &'a str;
type IResult<O> = Result<O, ErrMode<ContextError>>;

/// Rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    /// Formation rules, `FR`.
    Formation,
    /// Term rules, `TR`.
    Term,
}

impl RuleFamily {
    fn prefix(self) -> &'static str {
        match self {
            RuleFamily::Formation => "FR",
            RuleFamily::Term => "TR",
        }
    }
}

/// A rule that may be cited in a justification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    family: RuleFamily,
    symbol: String,
    abbreviating: bool,
}

impl Rule {
    pub fn new(family: RuleFamily, symbol: impl Into<String>) -> Self {
        Self {
            family,
            symbol: symbol.into(),
            abbreviating: false,
        }
    }

    /// An abbreviating rule, cited with a prime.
    pub fn abbreviating(family: RuleFamily, symbol: impl Into<String>) -> Self {
        Self {
            abbreviating: true,
            ..Self::new(family, symbol)
        }
    }

    pub fn family(&self) -> RuleFamily {
        self.family
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_abbreviating(&self) -> bool {
        self.abbreviating
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prime = if self.abbreviating { "'" } else { "" };
        write!(f, "{}{prime}({})", self.family.prefix(), self.symbol)
    }
}

/// One citation as written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Citation<'a> {
    family: RuleFamily,
    primed: bool,
    symbol: &'a str,
}

fn family(input: &mut Input<'_>) -> IResult<RuleFamily> {
    alt((
        "FR".value(RuleFamily::Formation),
        "TR".value(RuleFamily::Term),
    ))
    .parse_next(input)
}

fn citation<'a>(input: &mut Input<'a>) -> IResult<Citation<'a>> {
    (
        family,
        opt(one_of(['\'', '′'])),
        delimited('(', take_while(1.., |c: char| c != ')' && c != '('), ')'),
    )
        .map(|(family, prime, symbol)| Citation {
            family,
            primed: prime.is_some(),
            symbol: symbol.trim(),
        })
        .parse_next(input)
}

fn citations<'a>(input: &mut Input<'a>) -> IResult<Vec<Citation<'a>>> {
    repeat(0.., alt((citation.map(Some), any.value(None))))
        .fold(Vec::new, |mut acc: Vec<Citation<'a>>, item| {
            acc.extend(item);
            acc
        })
        .parse_next(input)
}

/// What a justification text cites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JustificationScan {
    /// Citations of known rules, written correctly.
    pub recognized: Vec<Rule>,
    /// Abbreviating rules cited without their prime.
    pub missing_prime: Vec<Rule>,
}

/// The rules students may cite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVocabulary {
    rules: Vec<Rule>,
}

impl RuleVocabulary {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn lookup(&self, family: RuleFamily, symbol: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.family == family && rule.symbol == symbol)
    }

    /// Scans a justification text for rule citations.
    ///
    /// # Example
    ///
    /// ```
    /// # use logicpad::tree::RuleVocabulary;
    /// let scan = RuleVocabulary::default().scan("FR(~), FR'(∧) and FR(∨)");
    ///
    /// assert_eq!(scan.recognized.len(), 2);
    /// assert_eq!(scan.missing_prime[0].to_string(), "FR'(∨)");
    /// ```
    pub fn scan(&self, text: &str) -> JustificationScan {
        let mut input = text;
        let found = citations(&mut input).unwrap_or_default();

        let mut scan = JustificationScan::default();
        for cite in found {
            let Some(rule) = self.lookup(cite.family, cite.symbol) else {
                continue;
            };
            if rule.abbreviating && !cite.primed {
                scan.missing_prime.push(rule.clone());
            } else if rule.abbreviating == cite.primed {
                scan.recognized.push(rule.clone());
            }
        }
        scan
    }
}

impl Default for RuleVocabulary {
    fn default() -> Self {
        use RuleFamily::{Formation, Term};
        Self::new([
            Rule::new(Formation, "s"),
            Rule::new(Formation, "r"),
            Rule::new(Formation, "~"),
            Rule::new(Formation, "→"),
            Rule::new(Formation, "∀"),
            Rule::abbreviating(Formation, "∧"),
            Rule::abbreviating(Formation, "∨"),
            Rule::abbreviating(Formation, "↔"),
            Rule::abbreviating(Formation, "∃"),
            Rule::new(Term, "v"),
            Rule::new(Term, "c"),
            Rule::new(Term, "f"),
        ])
    }
}
