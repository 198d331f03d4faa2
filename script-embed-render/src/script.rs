//! Script renderer
//!
//! Turns script units into JavaScript source text, either on a single
//! line for embedding inside markup or pretty-printed for reading.

use script_embed_core::{Expr, Ident, Literal, ScriptUnit, Stmt, UnaryOp};

use crate::RenderError;

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Layout used when printing a script unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Everything on one line, no optional whitespace
    SingleLine,
    /// One statement per line, two-space indentation
    Pretty,
}

/// Renderer for script units
#[derive(Debug, Clone)]
pub struct ScriptRenderer {
    fresh_prefix: String,
}

impl ScriptRenderer {
    pub fn new() -> Self {
        Self::with_fresh_prefix("jsid")
    }

    pub fn with_fresh_prefix(prefix: impl Into<String>) -> Self {
        Self {
            fresh_prefix: prefix.into(),
        }
    }

    pub fn fresh_prefix(&self) -> &str {
        &self.fresh_prefix
    }

    /// Render a unit. `label` is folded into the names of fresh
    /// identifiers (`<prefix>_<label>_<n>`).
    pub fn render(&self, unit: &ScriptUnit, mode: RenderMode, label: Option<&str>) -> String {
        let mut printer = Printer::new(&self.fresh_prefix, mode, label);
        match unit {
            ScriptUnit::Stmt(stmt) => printer.stmt(stmt),
            ScriptUnit::Expr(expr) => printer.expr(expr),
        }

        tracing::trace!(?mode, label, bytes = printer.out.len(), "rendered script unit");
        printer.out
    }

    /// Single-line rendering with a label, as used for embedded blocks
    pub fn render_one_line(&self, unit: &ScriptUnit, label: &str) -> String {
        self.render(unit, RenderMode::SingleLine, Some(label))
    }

    pub fn render_expr(&self, expr: &Expr, mode: RenderMode) -> String {
        let mut printer = Printer::new(&self.fresh_prefix, mode, None);
        printer.expr(expr);
        printer.out
    }

    /// Check identifiers and `return` placement without rendering
    pub fn validate(&self, unit: &ScriptUnit) -> Result<(), RenderError> {
        let mut validator = Validator { function_depth: 0 };
        match unit {
            ScriptUnit::Stmt(stmt) => validator.stmt(stmt),
            ScriptUnit::Expr(expr) => validator.expr(expr),
        }
    }
}

impl Default for ScriptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `name` can be written as a bare identifier or property name
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    }
}

/// Single-quoted JavaScript string literal. Line terminators are escaped
/// and `</` is written `<\/` so the literal is safe inside `<script>`.
pub fn quote_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    let mut prev = '\0';
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '/' if prev == '<' => out.push_str("\\/"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
        prev = c;
    }
    out.push('\'');
    out
}

struct Printer<'a> {
    fresh_prefix: &'a str,
    label: Option<&'a str>,
    mode: RenderMode,
    indent: usize,
    out: String,
}

impl<'a> Printer<'a> {
    fn new(fresh_prefix: &'a str, mode: RenderMode, label: Option<&'a str>) -> Self {
        Self {
            fresh_prefix,
            label,
            mode,
            indent: 0,
            out: String::new(),
        }
    }

    fn pretty(&self) -> bool {
        self.mode == RenderMode::Pretty
    }

    fn space(&mut self) {
        if self.pretty() {
            self.out.push(' ');
        }
    }

    fn line_start(&mut self) {
        if self.pretty() {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            for _ in 0..self.indent {
                self.out.push_str("  ");
            }
        }
    }

    fn separator(&mut self) {
        self.out.push(',');
        self.space();
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn body(&mut self, stmts: &[Stmt]) {
        self.out.push('{');
        self.indent += 1;
        self.stmts(stmts);
        self.indent -= 1;
        if !stmts.is_empty() {
            self.line_start();
        }
        self.out.push('}');
    }

    fn stmt(&mut self, stmt: &Stmt) {
        if let Stmt::Block(inner) = stmt {
            self.stmts(inner);
            return;
        }

        self.line_start();
        match stmt {
            Stmt::Var(ident, init) => {
                self.out.push_str("var ");
                self.ident(ident);
                if let Some(init) = init {
                    self.space();
                    self.out.push('=');
                    self.space();
                    self.expr(init);
                }
                self.out.push(';');
            }
            Stmt::Expr(expr) => {
                if starts_ambiguously(expr) {
                    self.out.push('(');
                    self.expr(expr);
                    self.out.push(')');
                } else {
                    self.expr(expr);
                }
                self.out.push(';');
            }
            Stmt::Return(None) => self.out.push_str("return;"),
            Stmt::Return(Some(expr)) => {
                self.out.push_str("return ");
                self.expr(expr);
                self.out.push(';');
            }
            Stmt::If(test, then, otherwise) => {
                self.out.push_str("if");
                self.space();
                self.out.push('(');
                self.expr(test);
                self.out.push(')');
                self.space();
                self.body(then);
                if !otherwise.is_empty() {
                    self.space();
                    self.out.push_str("else");
                    self.space();
                    self.body(otherwise);
                }
            }
            Stmt::While(test, body) => {
                self.out.push_str("while");
                self.space();
                self.out.push('(');
                self.expr(test);
                self.out.push(')');
                self.space();
                self.body(body);
            }
            Stmt::Block(_) => {}
        }
    }

    fn ident(&mut self, ident: &Ident) {
        match ident {
            Ident::Named(name) => {
                for c in name.chars() {
                    if c.is_alphanumeric() || c == '_' || c == '$' {
                        self.out.push(c);
                    } else {
                        self.out.push_str(&format!("\\u{{{:x}}}", c as u32));
                    }
                }
            }
            Ident::Fresh(index) => {
                self.out.push_str(self.fresh_prefix);
                self.out.push('_');
                if let Some(label) = self.label {
                    self.out.push_str(label);
                    self.out.push('_');
                }
                self.out.push_str(&index.to_string());
            }
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Null => self.out.push_str("null"),
            Literal::Bool(value) => self.out.push_str(if *value { "true" } else { "false" }),
            Literal::Int(value) => self.out.push_str(&value.to_string()),
            Literal::Float(value) => {
                let text = if value.is_nan() {
                    "NaN".to_string()
                } else if value.is_infinite() {
                    let sign = if *value > 0.0 { "" } else { "-" };
                    format!("{}Infinity", sign)
                } else {
                    value.to_string()
                };
                self.out.push_str(&text);
            }
            Literal::Str(value) => self.out.push_str(&quote_str(value)),
        }
    }

    fn wrapped(&mut self, expr: &Expr, wrap: bool) {
        if wrap {
            self.out.push('(');
            self.expr(expr);
            self.out.push(')');
        } else {
            self.expr(expr);
        }
    }

    fn args(&mut self, args: &[Expr]) {
        self.out.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.separator();
            }
            self.expr(arg);
        }
        self.out.push(')');
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Var(ident) => self.ident(ident),
            Expr::Lit(literal) => self.literal(literal),
            Expr::Json(value) => self.out.push_str(
                &value
                    .to_string()
                    .replace("</", "<\\/")
                    .replace('\u{2028}', "\\u2028")
                    .replace('\u{2029}', "\\u2029"),
            ),
            Expr::Array(items) => {
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.separator();
                    }
                    self.expr(item);
                }
                self.out.push(']');
            }
            Expr::Object(props) => {
                self.out.push('{');
                for (i, (key, value)) in props.iter().enumerate() {
                    if i > 0 {
                        self.separator();
                    }
                    if is_identifier_name(key) {
                        self.out.push_str(key);
                    } else {
                        self.out.push_str(&quote_str(key));
                    }
                    self.out.push(':');
                    self.space();
                    self.expr(value);
                }
                self.out.push('}');
            }
            Expr::Member(object, property) => {
                self.wrapped(object, wraps_as_target(object));
                if is_identifier_name(property) {
                    self.out.push('.');
                    self.out.push_str(property);
                } else {
                    self.out.push('[');
                    self.out.push_str(&quote_str(property));
                    self.out.push(']');
                }
            }
            Expr::Index(object, index) => {
                self.wrapped(object, wraps_as_target(object));
                self.out.push('[');
                self.expr(index);
                self.out.push(']');
            }
            Expr::Call(callee, args) => {
                self.wrapped(callee, wraps_as_target(callee));
                self.args(args);
            }
            Expr::New(callee, args) => {
                self.out.push_str("new ");
                self.wrapped(callee, wraps_as_target(callee) || reaches_call(callee));
                self.args(args);
            }
            Expr::Unary(op, operand) => {
                self.out.push_str(match op {
                    UnaryOp::Not => "!",
                    UnaryOp::Neg => "-",
                    UnaryOp::TypeOf => "typeof ",
                });
                self.wrapped(operand, wraps_as_operand(operand));
            }
            Expr::Binary(op, lhs, rhs) => {
                self.wrapped(lhs, wraps_as_operand(lhs));
                self.space();
                self.out.push_str(op.symbol());
                self.space();
                self.wrapped(rhs, wraps_as_operand(rhs));
            }
            Expr::Cond(test, then, otherwise) => {
                self.wrapped(test, wraps_as_operand(test));
                self.space();
                self.out.push('?');
                self.space();
                self.wrapped(then, wraps_as_operand(then));
                self.space();
                self.out.push(':');
                self.space();
                self.wrapped(otherwise, wraps_as_operand(otherwise));
            }
            Expr::Assign(target, value) => {
                self.expr(target);
                self.space();
                self.out.push('=');
                self.space();
                self.expr(value);
            }
            Expr::Func(params, body) => {
                self.out.push_str("function(");
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        self.separator();
                    }
                    self.ident(param);
                }
                self.out.push(')');
                self.space();
                self.body(body);
            }
        }
    }
}

fn is_negative_number(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(Literal::Int(value)) => *value < 0,
        Expr::Lit(Literal::Float(value)) => value.is_sign_negative(),
        Expr::Json(serde_json::Value::Number(n)) => n.as_f64().map_or(false, |v| v < 0.0),
        _ => false,
    }
}

/// Parenthesise when used as the object of `.`/`[]` or as a callee
fn wraps_as_target(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Func(..)
            | Expr::Binary(..)
            | Expr::Cond(..)
            | Expr::Assign(..)
            | Expr::Unary(..)
            | Expr::Lit(Literal::Int(_))
            | Expr::Lit(Literal::Float(_))
            | Expr::Json(serde_json::Value::Number(_))
    )
}

/// Whether a `new` callee contains a call along its member chain, which
/// would otherwise end the `new` expression early
fn reaches_call(expr: &Expr) -> bool {
    match expr {
        Expr::Call(..) => true,
        Expr::Member(object, _) | Expr::Index(object, _) => {
            !wraps_as_target(object) && reaches_call(object)
        }
        _ => false,
    }
}

/// Parenthesise when used as an operator operand
fn wraps_as_operand(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Func(..) | Expr::Binary(..) | Expr::Cond(..) | Expr::Assign(..) | Expr::Unary(..)
    ) || is_negative_number(expr)
}

/// An expression statement may not begin with `{` or `function`
fn starts_ambiguously(expr: &Expr) -> bool {
    match expr {
        Expr::Object(_) | Expr::Func(..) => true,
        Expr::Json(serde_json::Value::Object(_)) => true,
        Expr::Member(object, _) | Expr::Index(object, _) | Expr::Call(object, _) => {
            !wraps_as_target(object) && starts_ambiguously(object)
        }
        Expr::Binary(_, lhs, _) | Expr::Cond(lhs, _, _) => {
            !wraps_as_operand(lhs) && starts_ambiguously(lhs)
        }
        Expr::Assign(target, _) => starts_ambiguously(target),
        _ => false,
    }
}

struct Validator {
    function_depth: usize,
}

impl Validator {
    fn ident(&self, ident: &Ident, binding: bool) -> Result<(), RenderError> {
        let name = match ident {
            Ident::Named(name) => name,
            Ident::Fresh(_) => return Ok(()),
        };

        if !is_identifier_name(name) {
            return Err(RenderError::InvalidIdentifier(name.clone()));
        }
        if RESERVED_WORDS.contains(&name.as_str()) && (binding || name != "this") {
            return Err(RenderError::ReservedWord(name.clone()));
        }
        Ok(())
    }

    fn stmts(&mut self, stmts: &[Stmt]) -> Result<(), RenderError> {
        stmts.iter().try_for_each(|stmt| self.stmt(stmt))
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), RenderError> {
        match stmt {
            Stmt::Var(ident, init) => {
                self.ident(ident, true)?;
                match init {
                    Some(init) => self.expr(init),
                    None => Ok(()),
                }
            }
            Stmt::Expr(expr) => self.expr(expr),
            Stmt::Return(value) => {
                if self.function_depth == 0 {
                    return Err(RenderError::ReturnOutsideFunction);
                }
                match value {
                    Some(value) => self.expr(value),
                    None => Ok(()),
                }
            }
            Stmt::If(test, then, otherwise) => {
                self.expr(test)?;
                self.stmts(then)?;
                self.stmts(otherwise)
            }
            Stmt::While(test, body) => {
                self.expr(test)?;
                self.stmts(body)
            }
            Stmt::Block(inner) => self.stmts(inner),
        }
    }

    fn exprs(&mut self, exprs: &[Expr]) -> Result<(), RenderError> {
        exprs.iter().try_for_each(|expr| self.expr(expr))
    }

    fn expr(&mut self, expr: &Expr) -> Result<(), RenderError> {
        match expr {
            Expr::Var(ident) => self.ident(ident, false),
            Expr::Lit(_) | Expr::Json(_) => Ok(()),
            Expr::Array(items) => self.exprs(items),
            Expr::Object(props) => props.iter().try_for_each(|(_, value)| self.expr(value)),
            Expr::Member(object, _) => self.expr(object),
            Expr::Index(object, index) => {
                self.expr(object)?;
                self.expr(index)
            }
            Expr::Call(callee, args) | Expr::New(callee, args) => {
                self.expr(callee)?;
                self.exprs(args)
            }
            Expr::Unary(_, operand) => self.expr(operand),
            Expr::Binary(_, lhs, rhs) | Expr::Assign(lhs, rhs) => {
                self.expr(lhs)?;
                self.expr(rhs)
            }
            Expr::Cond(test, then, otherwise) => {
                self.expr(test)?;
                self.expr(then)?;
                self.expr(otherwise)
            }
            Expr::Func(params, body) => {
                for param in params {
                    self.ident(param, true)?;
                }
                self.function_depth += 1;
                let result = self.stmts(body);
                self.function_depth -= 1;
                result
            }
        }
    }
}
