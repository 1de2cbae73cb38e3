//! SQL grammar rules.
//!
//! Each rule consumes grammar tokens (no reserved classes, keywords matched by
//! value) and returns its AST node. The grammar is deliberately permissive so
//! half typed statements still produce a tree the reader can work with.
//!
//! A rule that fails may leave the scanner mid-way; whoever tries an
//! alternative after it wraps it in `chain`, `first_of`, `optional` or `many`.

use crate::parser::ast::*;
use crate::parser::engine::{Rule, Scanner};
use crate::sql::{GRAMMAR_RESERVED, Token, TokenKind};

const COMPARISON: &[&str] = &["<=>", "<>", "!=", "<=", ">=", "=", ">", "<"];
const LOGICAL: &[&str] = &["and", "&&", "xor", "or", "||"];
const CONCAT: &[&str] = &["&&", "||"];
const ADDITIVE: &[&str] = &["+", "-"];
const MULTIPLICATIVE: &[&str] = &["*", "/", "%", "div", "mod"];
const SELECT_SPEC: &[&str] = &[
    "all",
    "distinct",
    "distinctrow",
    "high_priority",
    "straight_join",
    "sql_small_result",
    "sql_big_result",
    "sql_buffer_result",
    "sql_cache",
    "sql_no_cache",
    "sql_calc_found_rows",
];

/// Root rule: statements separated by `;`, with an optional trailing `;`.
pub fn program(s: &mut Scanner<'_>) -> Option<Program> {
    let mut statements = vec![statement(s)?];
    statements.extend(s.many(|s| {
        s.literal(";")?;
        statement(s)
    }));
    s.optional(|s| s.literal(";"));
    Some(Program { statements })
}

pub fn statement(s: &mut Scanner<'_>) -> Option<Statement> {
    s.first_of(&[
        select_statement,
        create_table_statement,
        insert_statement,
        create_view_statement,
        set_statement,
        create_index_statement,
        create_function_statement,
        update_statement,
        show_statement,
        other_statement,
    ])
}

fn select_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    select_query(s).map(|q| Statement::Select(Box::new(q)))
}

fn create_table_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    create_table(s).map(Statement::CreateTable)
}

fn insert_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    insert(s).map(Statement::Insert)
}

fn create_view_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    create_view(s).map(Statement::CreateView)
}

fn set_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    set_variables(s).map(Statement::Set)
}

fn create_index_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    create_index(s).map(Statement::CreateIndex)
}

fn create_function_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    create_function(s).map(Statement::CreateFunction)
}

fn update_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    update(s).map(Statement::Update)
}

fn show_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    show(s).map(Statement::Show)
}

fn other_statement(s: &mut Scanner<'_>) -> Option<Statement> {
    let words = s.plus(word_sym)?;
    Some(Statement::Other(Other { words }))
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// An identifier: the cursor, or any word the grammar does not reserve.
pub fn word_sym(s: &mut Scanner<'_>) -> Option<Token> {
    s.cursor()
        .or_else(|| s.match_token_type(TokenKind::Word, GRAMMAR_RESERVED))
}

fn string_sym(s: &mut Scanner<'_>) -> Option<Token> {
    s.match_token_type(TokenKind::String, &[])
}

fn number_sym(s: &mut Scanner<'_>) -> Option<Token> {
    s.match_token_type(TokenKind::Number, &[])
}

fn string_or_word(s: &mut Scanner<'_>) -> Option<Token> {
    word_sym(s).or_else(|| string_sym(s))
}

/// Separator-delimited list with at least one item.
fn comma_list<T>(s: &mut Scanner<'_>, item: Rule<T>) -> Option<Vec<T>> {
    let mut items = vec![item(s)?];
    items.extend(s.many(|s| {
        s.literal(",")?;
        item(s)
    }));
    Some(items)
}

fn fold(first: Expr, rest: Vec<(Token, Expr)>) -> Expr {
    rest.into_iter()
        .fold(first, |left, (op, right)| Expr::binary(left, vec![op], right))
}

fn select_spec(s: &mut Scanner<'_>) -> Option<Token> {
    s.one_of(SELECT_SPEC)
}

fn alias(s: &mut Scanner<'_>) -> Option<Token> {
    s.chain(|s| {
        s.literal("as")?;
        string_or_word(s)
    })
    .or_else(|| string_or_word(s))
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

pub fn select_query(s: &mut Scanner<'_>) -> Option<Select> {
    let select = s.literal("select")?;
    let spec = s.many(select_spec);
    let result = comma_list(s, select_field)?;
    let from = s.optional(from_clause);
    let order_by = s.optional(order_by);
    let limit = s.optional(limit);
    let union = s.optional(union);
    Some(Select {
        select,
        spec,
        result,
        from,
        order_by,
        limit,
        union,
        alias: None,
    })
}

fn select_field(s: &mut Scanner<'_>) -> Option<ColumnField> {
    let not = s.many(|s| s.literal("not"));
    let name = field(s)?;
    let over = s.optional(over_clause);
    let alias = s.optional(alias);
    Some(ColumnField {
        not,
        name,
        over,
        alias,
    })
}

fn over_clause(s: &mut Scanner<'_>) -> Option<Over> {
    let over = s.literal("over")?;
    s.literal("(")?;
    let partition_by = s
        .optional(|s| {
            s.literal("partition")?;
            s.literal("by")?;
            comma_list(s, field)
        })
        .unwrap_or_default();
    let order_by = s.optional(order_by);
    s.closing(")")?;
    Some(Over {
        over,
        partition_by,
        order_by,
    })
}

fn union(s: &mut Scanner<'_>) -> Option<Union> {
    let union = s.literal("union")?;
    let quantifier = s.optional(|s| s.one_of(&["all", "distinct"]));
    let select = select_query(s)?;
    Some(Union {
        union,
        quantifier,
        select: Box::new(select),
    })
}

fn from_clause(s: &mut Scanner<'_>) -> Option<FromClause> {
    let from = s.literal("from")?;
    let sources = comma_list(s, table_source)?;
    let where_clause = s.optional(where_clause);
    let group_by = s.optional(group_by);
    let having = s.optional(|s| {
        s.literal("having")?;
        expression(s)
    });
    Some(FromClause {
        from,
        sources,
        where_clause,
        group_by,
        having,
    })
}

fn table_source(s: &mut Scanner<'_>) -> Option<TableSource> {
    let source = source_item(s)?;
    let joins = s.many(join);
    Some(TableSource { source, joins })
}

/// A table, or a parenthesised select with an optional alias.
fn source_item(s: &mut Scanner<'_>) -> Option<SourceItem> {
    s.chain(|s| {
        s.literal("(")?;
        let mut query = select_query(s)?;
        s.closing(")")?;
        query.alias = s.optional(alias);
        Some(SourceItem::Select(Box::new(query)))
    })
    .or_else(|| {
        let name = table_name(s)?;
        let alias = s.optional(alias);
        Some(SourceItem::Table(TableRef { name, alias }))
    })
}

/// `namespace.table` is tried before a bare `table`.
fn table_name(s: &mut Scanner<'_>) -> Option<TableName> {
    s.chain(|s| {
        let namespace = string_or_word(s)?;
        s.literal(".")?;
        let table = string_or_word(s)?;
        Some(TableName {
            namespace: Some(namespace),
            table,
        })
    })
    .or_else(|| {
        Some(TableName {
            namespace: None,
            table: string_or_word(s)?,
        })
    })
}

fn join(s: &mut Scanner<'_>) -> Option<Join> {
    let keywords = join_keywords(s)?;
    let join = source_item(s)?;
    let conditions = s.optional(|s| {
        s.literal("on")?;
        expression(s)
    });
    Some(Join {
        keywords,
        join,
        conditions,
    })
}

fn join_keywords(s: &mut Scanner<'_>) -> Option<Vec<Token>> {
    let mut keywords = Vec::new();
    keywords.extend(s.literal("natural"));
    keywords.extend(s.one_of(&["inner", "cross", "full", "left", "right"]));
    keywords.extend(s.literal("outer"));
    keywords.push(s.one_of(&["join", "straight_join"])?);
    Some(keywords)
}

fn where_clause(s: &mut Scanner<'_>) -> Option<Expr> {
    s.literal("where")?;
    expression(s)
}

fn group_by(s: &mut Scanner<'_>) -> Option<GroupBy> {
    let keywords = vec![s.literal("group")?, s.literal("by")?];
    let fields = comma_list(s, column_entry)?;
    Some(GroupBy { keywords, fields })
}

fn order_by(s: &mut Scanner<'_>) -> Option<OrderBy> {
    let keywords = vec![s.literal("order")?, s.literal("by")?];
    let items = comma_list(s, order_item)?;
    Some(OrderBy { keywords, items })
}

fn order_item(s: &mut Scanner<'_>) -> Option<OrderItem> {
    let expr = expression(s)?;
    let direction = s.optional(|s| s.one_of(&["asc", "desc"]));
    Some(OrderItem { expr, direction })
}

/// `LIMIT offset, count`, then `LIMIT count OFFSET offset`, then `LIMIT count`.
fn limit(s: &mut Scanner<'_>) -> Option<Limit> {
    let limit = s.literal("limit")?;
    let pair = s.optional(|s| {
        let offset = number_sym(s)?;
        s.literal(",")?;
        Some((offset, number_sym(s)?))
    });
    if let Some((offset, count)) = pair {
        return Some(Limit {
            limit,
            count,
            offset: Some(offset),
        });
    }
    let count = number_sym(s)?;
    let offset = s.optional(|s| {
        s.literal("offset")?;
        number_sym(s)
    });
    Some(Limit {
        limit,
        count,
        offset,
    })
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Boolean expression joined by logical operators, folded left to right.
pub fn expression(s: &mut Scanner<'_>) -> Option<Expr> {
    let first = expression_head(s)?;
    let rest = s.many(|s| {
        let op = s.one_of(LOGICAL)?;
        Some((op, expression_head(s)?))
    });
    Some(fold(first, rest))
}

fn expression_head(s: &mut Scanner<'_>) -> Option<Expr> {
    let expr = s.first_of(&[boolean_primary, negated_expression, parenthesized_expression])?;
    Some(match s.optional(truth_test) {
        Some(op) => Expr::Postfix(Box::new(Postfix { operand: expr, op })),
        None => expr,
    })
}

fn negated_expression(s: &mut Scanner<'_>) -> Option<Expr> {
    let not = s.one_of(&["not", "!"])?;
    let operand = expression(s)?;
    Some(Expr::Unary(Box::new(Unary {
        op: vec![not],
        operand,
    })))
}

fn parenthesized_expression(s: &mut Scanner<'_>) -> Option<Expr> {
    s.literal("(")?;
    let inner = expression(s)?;
    s.closing(")")?;
    Some(inner)
}

/// `IS [NOT] TRUE | FALSE | UNKNOWN`
fn truth_test(s: &mut Scanner<'_>) -> Option<Vec<Token>> {
    let mut op = vec![s.literal("is")?];
    op.extend(s.optional(|s| s.literal("not")));
    op.push(s.one_of(&["true", "false", "unknown"])?);
    Some(op)
}

/// What follows the left operand of a predicate.
enum Tail {
    Compare(Vec<Token>, Expr),
    Between(Vec<Token>, Expr, Expr),
    Postfix(Vec<Token>),
}

impl Tail {
    fn apply(self, operand: Expr) -> Expr {
        match self {
            Tail::Compare(op, right) => Expr::binary(operand, op, right),
            Tail::Between(op, low, high) => Expr::Between(Box::new(Between {
                operand,
                op,
                low,
                high,
            })),
            Tail::Postfix(op) => Expr::Postfix(Box::new(Postfix { operand, op })),
        }
    }
}

fn boolean_primary(s: &mut Scanner<'_>) -> Option<Expr> {
    let first = predicate(s)?;
    let tails = s.many(|s| {
        if let Some(isnull) = s.literal("isnull") {
            return Some(Tail::Postfix(vec![isnull]));
        }
        let mut op = match s.literal("is") {
            Some(is) => {
                let mut op = vec![is];
                op.extend(s.optional(|s| s.literal("not")));
                op
            }
            None => vec![s.literal("not")?],
        };
        if let Some(null) = s.literal("null") {
            op.push(null);
            return Some(Tail::Postfix(op));
        }
        Some(Tail::Compare(op, column_field(s)?))
    });
    Some(tails.into_iter().fold(first, |expr, tail| tail.apply(expr)))
}

fn predicate(s: &mut Scanner<'_>) -> Option<Expr> {
    let subject = s.chain(column_field).or_else(|| {
        s.literal("(")?;
        let inner = predicate(s)?;
        s.closing(")")?;
        Some(inner)
    })?;
    Some(match s.optional(predicate_tail) {
        Some(tail) => tail.apply(subject),
        None => subject,
    })
}

fn predicate_tail(s: &mut Scanner<'_>) -> Option<Tail> {
    s.first_of(&[comparison_tail, sounds_like_tail, membership_tail])
}

fn comparison_tail(s: &mut Scanner<'_>) -> Option<Tail> {
    let op = s.one_of(COMPARISON)?;
    Some(Tail::Compare(vec![op], column_field(s)?))
}

fn sounds_like_tail(s: &mut Scanner<'_>) -> Option<Tail> {
    let op = vec![s.literal("sounds")?, s.literal("like")?];
    Some(Tail::Compare(op, column_field(s)?))
}

/// `[IS] [NOT]` followed by `IN`, `BETWEEN`, `LIKE`, `REGEXP` or `NULL`.
fn membership_tail(s: &mut Scanner<'_>) -> Option<Tail> {
    let mut op: Vec<Token> = s.literal("is").into_iter().collect();
    op.extend(s.literal("not"));

    if let Some(keyword) = s.literal("in") {
        op.push(keyword);
        s.literal("(")?;
        let list = s
            .chain(|s| select_query(s).map(|q| Expr::Subquery(Box::new(q))))
            .or_else(|| comma_list(s, column_field).map(Expr::Tuple))?;
        s.closing(")")?;
        return Some(Tail::Compare(op, list));
    }
    if let Some(keyword) = s.literal("between") {
        op.push(keyword);
        let low = field(s)?;
        if s.stopped_at_cursor() {
            return Some(Tail::Compare(op, low));
        }
        op.push(s.literal("and")?);
        let high = field(s)?;
        return Some(Tail::Between(op, low, high));
    }
    if let Some(keyword) = s.literal("like") {
        op.push(keyword);
        let pattern = field(s)?;
        let escaped = s.optional(|s| {
            let escape = s.literal("escape")?;
            Some((escape, field(s)?))
        });
        let right = match escaped {
            Some((escape, with)) => Expr::binary(pattern, vec![escape], with),
            None => pattern,
        };
        return Some(Tail::Compare(op, right));
    }
    if let Some(keyword) = s.literal("regexp") {
        op.push(keyword);
        return Some(Tail::Compare(op, field(s)?));
    }
    op.push(s.literal("null")?);
    Some(Tail::Postfix(op))
}

/// A field in a position where a column name may be typed.
pub fn column_field(s: &mut Scanner<'_>) -> Option<Expr> {
    field(s).map(Expr::column)
}

fn column_entry(s: &mut Scanner<'_>) -> Option<ColumnField> {
    field(s).map(ColumnField::new)
}

/// Arithmetic over field items: `+ -` bind looser than `* / % DIV MOD`.
pub fn field(s: &mut Scanner<'_>) -> Option<Expr> {
    let first = multiplicative(s)?;
    let rest = s.many(|s| {
        let op = s.one_of(ADDITIVE)?;
        Some((op, multiplicative(s)?))
    });
    Some(fold(first, rest))
}

fn multiplicative(s: &mut Scanner<'_>) -> Option<Expr> {
    let first = term(s)?;
    let rest = s.many(|s| {
        let op = s.one_of(MULTIPLICATIVE)?;
        Some((op, term(s)?))
    });
    Some(fold(first, rest))
}

fn term(s: &mut Scanner<'_>) -> Option<Expr> {
    s.first_of(&[scalar_subquery, parenthesized_field, field_item])
}

fn scalar_subquery(s: &mut Scanner<'_>) -> Option<Expr> {
    s.literal("(")?;
    let query = select_query(s)?;
    s.closing(")")?;
    Some(Expr::Subquery(Box::new(query)))
}

fn parenthesized_field(s: &mut Scanner<'_>) -> Option<Expr> {
    s.literal("(")?;
    let inner = field(s)?;
    s.closing(")")?;
    Some(inner)
}

fn field_item(s: &mut Scanner<'_>) -> Option<Expr> {
    let first = field_item_detail(s)?;
    let rest = s.many(|s| {
        let op = s.one_of(CONCAT)?;
        Some((op, field_item_detail(s)?))
    });
    Some(fold(first, rest))
}

fn field_item_detail(s: &mut Scanner<'_>) -> Option<Expr> {
    s.first_of(&[function_expr, case_expr, qualified_item, literal_value, star])
}

fn function_expr(s: &mut Scanner<'_>) -> Option<Expr> {
    s.first_of(&[cast_function, normal_function, if_function])
        .map(|f| Expr::Function(Box::new(f)))
}

fn case_expr(s: &mut Scanner<'_>) -> Option<Expr> {
    case(s).map(|c| Expr::Case(Box::new(c)))
}

fn star(s: &mut Scanner<'_>) -> Option<Expr> {
    s.literal("*").map(Expr::Token)
}

/// A word or quoted name, optionally qualified: `g.*`, `g:fn(..)`, `g.name`.
fn qualified_item(s: &mut Scanner<'_>) -> Option<Expr> {
    let head = string_or_word(s)?;
    let group_all = s.optional(|s| {
        s.literal(".")?;
        s.literal("*")
    });
    if let Some(star) = group_all {
        return Some(Expr::GroupAll(GroupAll { group: head, star }));
    }
    let grouped_function = s.optional(|s| {
        s.literal(":")?;
        normal_function(s)
    });
    if let Some(mut function) = grouped_function {
        function.group = Some(head);
        return Some(Expr::Function(Box::new(function)));
    }
    let member = s.optional(|s| {
        s.literal(".")?;
        string_sym(s)
            .or_else(|| number_sym(s))
            .or_else(|| word_sym(s))
    });
    Some(match member {
        Some(name) => Expr::ColumnAfterGroup(ColumnAfterGroup { group: head, name }),
        None => Expr::Token(head),
    })
}

fn literal_value(s: &mut Scanner<'_>) -> Option<Expr> {
    if let Some(sign) = s.one_of(ADDITIVE) {
        let number = number_sym(s)?;
        return Some(Expr::Unary(Box::new(Unary {
            op: vec![sign],
            operand: Expr::Token(number),
        })));
    }
    number_sym(s)
        .or_else(|| s.match_token_type(TokenKind::Placeholder, &[]))
        .or_else(|| s.one_of(&["null", "true", "false"]))
        .map(Expr::Token)
}

fn cast_function(s: &mut Scanner<'_>) -> Option<Function> {
    let name = s.literal("cast")?;
    s.literal("(")?;
    let mut args = vec![field(s)?];
    s.literal("as")?;
    args.extend(data_type(s)?.into_iter().map(Expr::Token));
    s.closing(")")?;
    Some(Function {
        group: None,
        name,
        spec: Vec::new(),
        args,
        filter: None,
    })
}

/// `name(args) [FILTER (WHERE ..)]`
pub fn normal_function(s: &mut Scanner<'_>) -> Option<Function> {
    let name = word_sym(s)?;
    s.literal("(")?;
    let (spec, args) = s.optional(function_args).unwrap_or_default();
    s.closing(")")?;
    let filter = s.optional(|s| {
        s.literal("filter")?;
        s.literal("(")?;
        let condition = where_clause(s)?;
        s.closing(")")?;
        Some(condition)
    });
    Some(Function {
        group: None,
        name,
        spec,
        args,
        filter,
    })
}

fn function_args(s: &mut Scanner<'_>) -> Option<(Vec<Token>, Vec<Expr>)> {
    let spec = s.many(select_spec);
    let args = comma_list(s, column_field)?;
    Some((spec, args))
}

/// `IF(condition, then, else)`
fn if_function(s: &mut Scanner<'_>) -> Option<Function> {
    let name = s.literal("if")?;
    s.literal("(")?;
    let condition = expression(s)?;
    s.literal(",")?;
    let then = field(s)?;
    s.literal(",")?;
    let otherwise = field(s)?;
    s.closing(")")?;
    Some(Function {
        group: None,
        name,
        spec: Vec::new(),
        args: vec![condition, then, otherwise],
        filter: None,
    })
}

fn case(s: &mut Scanner<'_>) -> Option<Case> {
    let case = s.literal("case")?;
    let operand = s.optional(field);
    let whens = s.plus(|s| {
        s.literal("when")?;
        let condition = expression(s)?;
        s.literal("then")?;
        let result = column_field(s)?;
        Some(CaseWhen { condition, result })
    })?;
    let else_result = s.optional(|s| {
        s.literal("else")?;
        column_field(s)
    });
    let end = s.literal("end")?;
    let alias = s.optional(|s| {
        s.literal("as")?;
        word_sym(s)
    });
    Some(Case {
        case,
        operand,
        whens,
        else_result,
        end,
        alias,
    })
}

/// A type name with optional precision: `varchar(255)`, `decimal(10, 2)`.
fn data_type(s: &mut Scanner<'_>) -> Option<Vec<Token>> {
    let mut tokens = vec![s.match_token_type(TokenKind::Word, &[])?];
    let precision = s.optional(|s| {
        s.literal("(")?;
        let numbers = comma_list(s, number_sym)?;
        s.closing(")")?;
        Some(numbers)
    });
    tokens.extend(precision.into_iter().flatten());
    Some(tokens)
}

// ---------------------------------------------------------------------------
// Other statements
// ---------------------------------------------------------------------------

fn create_table(s: &mut Scanner<'_>) -> Option<CreateTable> {
    let mut keywords = vec![s.literal("create")?, s.literal("table")?];
    let if_not_exists = s.optional(|s| Some(vec![s.literal("if")?, s.literal("not")?, s.literal("exists")?]));
    keywords.extend(if_not_exists.into_iter().flatten());
    let name = string_or_word(s)?;
    s.literal("(")?;
    let columns = comma_list(s, column_definition)?;
    s.closing(")")?;
    let options = s
        .optional(|s| {
            s.literal("with")?;
            s.literal("(")?;
            let options = comma_list(s, table_option)?;
            s.closing(")")?;
            Some(options)
        })
        .unwrap_or_default();
    Some(CreateTable {
        keywords,
        name,
        columns,
        options,
    })
}

fn column_definition(s: &mut Scanner<'_>) -> Option<ColumnDefinition> {
    let name = string_or_word(s)?;
    let data_type = data_type(s)?;
    let constraints = s.many(|s| {
        word_sym(s)
            .or_else(|| s.one_of(&["not", "null"]))
            .or_else(|| string_sym(s))
            .or_else(|| number_sym(s))
    });
    Some(ColumnDefinition {
        name,
        data_type,
        constraints,
    })
}

fn table_option(s: &mut Scanner<'_>) -> Option<TableOption> {
    let key = string_or_word(s)?;
    s.literal("=")?;
    let value = string_sym(s)
        .or_else(|| number_sym(s))
        .or_else(|| word_sym(s))?;
    Some(TableOption { key, value })
}

fn insert(s: &mut Scanner<'_>) -> Option<Insert> {
    let keywords = vec![s.literal("insert")?, s.literal("into")?];
    let into = s.optional(|s| {
        Some(TableRef {
            name: table_name(s)?,
            alias: None,
        })
    });
    let columns = s
        .optional(|s| {
            s.literal("(")?;
            let columns = comma_list(s, column_entry)?;
            s.closing(")")?;
            Some(columns)
        })
        .unwrap_or_default();
    let select = s.optional(select_query).map(Box::new);
    let values = match select {
        Some(_) => Vec::new(),
        None => s.optional(values).unwrap_or_default(),
    };
    Some(Insert {
        keywords,
        into,
        columns,
        select,
        values,
    })
}

fn values(s: &mut Scanner<'_>) -> Option<Vec<ValuesRow>> {
    s.literal("values")?;
    comma_list(s, values_row)
}

fn values_row(s: &mut Scanner<'_>) -> Option<ValuesRow> {
    s.literal("(")?;
    let values = comma_list(s, field)?;
    s.closing(")")?;
    Some(ValuesRow { values })
}

fn create_view(s: &mut Scanner<'_>) -> Option<CreateView> {
    let keywords = vec![s.literal("create")?, s.literal("view")?];
    let name = word_sym(s)?;
    s.literal("as")?;
    let select = select_query(s)?;
    Some(CreateView {
        keywords,
        name,
        select: Box::new(select),
    })
}

fn set_variables(s: &mut Scanner<'_>) -> Option<SetVariables> {
    let set = s.literal("set")?;
    let assignments = comma_list(s, assignment)?;
    Some(SetVariables { set, assignments })
}

fn assignment(s: &mut Scanner<'_>) -> Option<Assignment> {
    let mut name = vec![word_sym(s)?];
    name.extend(s.many(|s| {
        s.literal(".")?;
        word_sym(s)
    }));
    s.literal("=")?;
    let value = s
        .one_of(&["true", "false"])
        .or_else(|| string_sym(s))
        .or_else(|| number_sym(s))?;
    Some(Assignment { name, value })
}

fn create_index(s: &mut Scanner<'_>) -> Option<CreateIndex> {
    let mut keywords = vec![s.literal("create")?];
    keywords.extend(s.literal("unique"));
    keywords.push(s.literal("index")?);
    let mut name = vec![string_or_word(s)?];
    name.extend(s.many(|s| {
        s.literal(".")?;
        string_or_word(s)
    }));
    keywords.push(s.literal("on")?);
    let table = string_or_word(s)?;
    s.literal("(")?;
    let columns = comma_list(s, index_column)?;
    s.closing(")")?;
    let where_clause = s.optional(where_clause);
    Some(CreateIndex {
        keywords,
        name,
        table,
        columns,
        where_clause,
    })
}

fn index_column(s: &mut Scanner<'_>) -> Option<IndexColumn> {
    let name = string_or_word(s)?;
    let direction = s.optional(|s| s.one_of(&["asc", "desc"]));
    Some(IndexColumn { name, direction })
}

fn create_function(s: &mut Scanner<'_>) -> Option<CreateFunction> {
    let keywords = vec![s.literal("create")?, s.literal("function")?];
    let name = word_sym(s)?;
    s.literal("as")?;
    let body = string_sym(s)?;
    Some(CreateFunction {
        keywords,
        name,
        body,
    })
}

fn update(s: &mut Scanner<'_>) -> Option<Update> {
    let update = s.literal("update")?;
    let table = source_item(s)?;
    let set = s
        .optional(|s| {
            s.literal("set")?;
            comma_list(s, update_assignment)
        })
        .unwrap_or_default();
    let where_clause = s.optional(where_clause);
    Some(Update {
        update,
        table,
        set,
        where_clause,
    })
}

fn update_assignment(s: &mut Scanner<'_>) -> Option<UpdateAssignment> {
    let column = ColumnField::new(Expr::Token(word_sym(s)?));
    let value = s.optional(|s| {
        s.literal("=")?;
        column_entry(s)
    });
    Some(UpdateAssignment { column, value })
}

fn show(s: &mut Scanner<'_>) -> Option<Show> {
    let keywords = vec![s.literal("show")?, s.one_of(&["databases", "tables"])?];
    Some(Show { keywords })
}
