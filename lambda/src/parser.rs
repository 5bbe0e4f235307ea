use crate::syntax::{Command, KEYWORDS, RawTerm};
use chumsky::prelude::*;
use std::rc::Rc;
use util::parser::{blank, ident, int};

fn lexeme<O>(
    parser: impl Parser<char, O, Error = Simple<char>> + Clone,
) -> impl Parser<char, O, Error = Simple<char>> + Clone {
    parser.then_ignore(blank())
}

fn command(name: &'static str) -> impl Parser<char, (), Error = Simple<char>> + Clone {
    lexeme(just(':').ignore_then(text::keyword(name)))
}

impl RawTerm {
    pub fn parse(input: &str) -> Result<Rc<Self>, Vec<Simple<char>>> {
        blank()
            .ignore_then(Self::parser())
            .then_ignore(end())
            .parse(input)
    }

    fn parser() -> impl Parser<char, Rc<Self>, Error = Simple<char>> + Clone {
        recursive(|term| {
            let name = lexeme(ident(KEYWORDS.iter().copied()));

            let var = name.clone().map(Self::var);

            let parens = term
                .clone()
                .delimited_by(lexeme(just('(')), lexeme(just(')')));

            let atom = var.or(parens);

            let lambda = lexeme(choice((
                just('\\').ignored(),
                just('λ').ignored(),
                text::keyword("lambda"),
            )));

            let abs = lambda
                .ignore_then(name.repeated().at_least(1))
                .then_ignore(lexeme(just('.')))
                .then(term)
                .map(|(params, body)| {
                    params
                        .into_iter()
                        .rev()
                        .fold(body, |body, x| Self::abs(x, body))
                });

            let app = atom
                .clone()
                .then(atom.repeated())
                .foldl(Self::app)
                .then(abs.clone().or_not())
                .map(|(t1, t2)| match t2 {
                    Some(t2) => Self::app(t1, t2),
                    None => t1,
                });

            abs.or(app)
        })
    }
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, Vec<Simple<char>>> {
        Self::parser().then_ignore(end()).parse(input)
    }

    /// Parses a sequence of commands separated by `;`, dropping empty ones.
    pub fn parse_program(input: &str) -> Result<Vec<Self>, Vec<Simple<char>>> {
        Self::parser()
            .separated_by(lexeme(just(';')))
            .then_ignore(end())
            .map(|commands| {
                commands
                    .into_iter()
                    .filter(|cmd| *cmd != Self::Noop)
                    .collect()
            })
            .parse(input)
    }

    fn parser() -> impl Parser<char, Self, Error = Simple<char>> + Clone {
        let term = RawTerm::parser();

        let eval1 = command("eval1")
            .ignore_then(term.clone())
            .map(Self::Eval1);
        let eval = command("eval").ignore_then(term.clone()).map(Self::Eval);
        let debruijn = command("debruijn")
            .ignore_then(term.clone())
            .map(Self::DeBruijn);

        let binding = lexeme(ident(KEYWORDS.iter().copied()))
            .then_ignore(lexeme(just('=')))
            .then(term.clone());
        let bind = command("bind")
            .ignore_then(binding.clone())
            .or(binding)
            .map(|(x, t)| Self::Bind(x, t));

        let steps = command("steps").ignore_then(lexeme(int())).map(Self::Steps);

        let noop = empty().to(Self::Noop);

        blank().ignore_then(choice((
            eval1,
            eval,
            debruijn,
            bind,
            steps,
            term.map(Self::Eval),
            noop,
        )))
    }
}
