// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parser for the template surface.
//!
//! The surface is small: literal text, `{# ... #}` comments (discarded), and
//! `{{ ... }}` print blocks. Print blocks hold expressions built from calls,
//! filter applications, literals, and free-standing names:
//!
//! ```text
//! <h1>Archive</h1>
//! {# newest first #}
//! {{ render_documents(paginate(documents, 10)) }}
//! ```
//!
//! Parsing produces a [`Module`] whose nodes carry 1-indexed source lines
//! (via [`LineIndex`]), which is what compile errors point at. Grammar
//! failures surface as [`CompileError::Parse`] with the template name and
//! the offending line/column.

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::nodes::{Call, Const, Expr, Filter, Module, NameRef, Print, Stmt, Text, Value};
use crate::text::LineIndex;

peg::parser! {
    grammar template_grammar(ix: &LineIndex) for str {
        pub rule template() -> Vec<Stmt>
            = segments:(segment())* ![_] { segments.into_iter().flatten().collect() }

        rule segment() -> Option<Stmt>
            = comment() { None }
            / print:print_block() { Some(print) }
            / text:text() { Some(text) }

        rule comment() = "{#" (!"#}" [_])* "#}"

        rule print_block() -> Stmt
            = pos:position!() "{{" _ expr:expression() _ "}}"
              { Stmt::Print(Print::new(expr, ix.line_of(pos))) }

        rule text() -> Stmt
            = pos:position!() content:$((!("{{" / "{#") [_])+)
              { Stmt::Text(Text::new(content, ix.line_of(pos))) }

        pub rule standalone_expression() -> Expr
            = _ expr:expression() _ ![_] { expr }

        rule expression() -> Expr
            = base:primary() filters:(filter_suffix())* {
                filters.into_iter().fold(base, |input, (name, args, line)| {
                    Expr::Filter(Filter::new(input, name, args, line))
                })
            }

        rule filter_suffix() -> (String, Vec<Expr>, u32)
            = _ "|" _ pos:position!() name:ident() args:(filter_args())?
              { (name, args.unwrap_or_default(), ix.line_of(pos)) }

        rule filter_args() -> Vec<Expr>
            = _ "(" _ args:(expression() ** (_ "," _)) _ ")" { args }

        rule primary() -> Expr
            = boolean() / number() / string() / call() / name_ref() / parenthesized()

        rule parenthesized() -> Expr
            = "(" _ expr:expression() _ ")" { expr }

        rule boolean() -> Expr
            = pos:position!() value:bool_token() !ident_char()
              { Expr::Const(Const::new(Value::Bool(value), ix.line_of(pos))) }

        rule bool_token() -> bool
            = "true" { true }
            / "false" { false }

        rule number() -> Expr
            = pos:position!() value:(float_literal() / int_literal())
              { Expr::Const(Const::new(value, ix.line_of(pos))) }

        rule float_literal() -> Value
            = n:$("-"? ['0'..='9']+ "." ['0'..='9']+)
              {? n.parse::<f64>().map(Value::Float).map_err(|_| "float") }

        rule int_literal() -> Value
            = n:$("-"? ['0'..='9']+)
              {? n.parse::<i64>().map(Value::Int).map_err(|_| "integer") }

        rule string() -> Expr
            = pos:position!() value:(dq_string() / sq_string())
              { Expr::Const(Const::new(Value::Str(value), ix.line_of(pos))) }

        rule dq_string() -> String
            = "\"" chars:$([^ '"']*) "\"" { chars.to_string() }

        rule sq_string() -> String
            = "'" chars:$([^ '\'']*) "'" { chars.to_string() }

        rule call() -> Expr
            = pos:position!() name:ident() _ "(" _ args:(expression() ** (_ "," _)) _ ")"
              { Expr::Call(Call::new(name, args, ix.line_of(pos))) }

        rule name_ref() -> Expr
            = pos:position!() name:ident() { Expr::NameRef(NameRef::new(name, ix.line_of(pos))) }

        rule ident() -> String
            = s:quiet!{$(['a'..='z' | 'A'..='Z' | '_'] ident_char()*)} { s.to_string() }
            / expected!("identifier")

        rule ident_char() = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']

        rule _() = quiet!{ [' ' | '\t' | '\r' | '\n']* }
    }
}

/// Parse template source into a [`Module`] named `name`.
pub fn parse_template(name: impl Into<String>, source: &str) -> CompileResult<Module> {
    let name = name.into();
    let index = LineIndex::new(source);
    let body =
        template_grammar::template(source, &index).map_err(|err| CompileError::Parse {
            template: name.clone(),
            source: err,
        })?;
    debug!(template = %name, statements = body.len(), "parsed template");
    Ok(Module::with_body(name, body))
}

/// Parse a single expression, for tooling and tests.
///
/// The whole input must be one expression (leading and trailing whitespace
/// is allowed).
pub fn parse_expression(source: &str) -> CompileResult<Expr> {
    let index = LineIndex::new(source);
    template_grammar::standalone_expression(source, &index).map_err(|err| CompileError::Parse {
        template: "<expression>".to_string(),
        source: err,
    })
}
