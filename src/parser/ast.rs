//! Typed syntax tree.
//!
//! Every leaf is a `Token`, so any node can be related back to the source
//! text. Positions the user has not typed yet are filled by the zero-width
//! cursor token when the cursor sits there, which keeps partial statements
//! such as `SELECT * FROM ` representable.

use crate::sql::Token;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Box<Select>),
    CreateTable(CreateTable),
    Insert(Insert),
    CreateView(CreateView),
    Set(SetVariables),
    CreateIndex(CreateIndex),
    CreateFunction(CreateFunction),
    Update(Update),
    Show(Show),
    /// Anything else made of plain words.
    Other(Other),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub select: Token,
    /// `DISTINCT`, `ALL` and friends.
    pub spec: Vec<Token>,
    pub result: Vec<ColumnField>,
    pub from: Option<FromClause>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
    pub union: Option<Union>,
    /// Set when the select is used as a table source: `(SELECT ..) alias`.
    pub alias: Option<Token>,
}

impl Select {
    /// True for `SELECT *`, which passes every source field through.
    pub fn is_star(&self) -> bool {
        matches!(self.result.as_slice(), [ColumnField { name: Expr::Token(t), .. }] if t.text == "*")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub union: Token,
    pub quantifier: Option<Token>,
    pub select: Box<Select>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub from: Token,
    pub sources: Vec<TableSource>,
    pub where_clause: Option<Expr>,
    pub group_by: Option<GroupBy>,
    pub having: Option<Expr>,
}

/// One comma separated entry of a FROM clause with its joins.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSource {
    pub source: SourceItem,
    pub joins: Vec<Join>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceItem {
    Table(TableRef),
    Select(Box<Select>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub name: TableName,
    pub alias: Option<Token>,
}

/// `table` or `namespace.table`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableName {
    pub namespace: Option<Token>,
    pub table: Token,
}

impl TableName {
    /// Name parts that carry text. The cursor token never counts.
    pub fn bound_parts(&self) -> Vec<&str> {
        self.namespace
            .iter()
            .chain(std::iter::once(&self.table))
            .filter(|t| !t.is_cursor() && !t.text.is_empty())
            .map(|t| t.text.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub keywords: Vec<Token>,
    pub join: SourceItem,
    pub conditions: Option<Expr>,
}

/// An entry of a select list, group-by list, set list or any other place a
/// column name may be typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnField {
    pub not: Vec<Token>,
    pub name: Expr,
    pub over: Option<Over>,
    pub alias: Option<Token>,
}

impl ColumnField {
    pub fn new(name: Expr) -> Self {
        Self {
            not: Vec::new(),
            name,
            over: None,
            alias: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Over {
    pub over: Token,
    pub partition_by: Vec<Expr>,
    pub order_by: Option<OrderBy>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier, literal, placeholder, `*` or the cursor.
    Token(Token),
    /// A column position inside an expression.
    Column(Box<ColumnField>),
    /// `group.name`
    ColumnAfterGroup(ColumnAfterGroup),
    /// `group.*`
    GroupAll(GroupAll),
    Function(Box<Function>),
    Case(Box<Case>),
    Subquery(Box<Select>),
    /// Parenthesised list, as in `IN (1, 2)`.
    Tuple(Vec<Expr>),
    Unary(Box<Unary>),
    Binary(Box<Binary>),
    Between(Box<Between>),
    /// `IS NULL`, `ISNULL`, `IS NOT TRUE` and similar.
    Postfix(Box<Postfix>),
}

impl Expr {
    pub fn column(name: Expr) -> Self {
        Expr::Column(Box::new(ColumnField::new(name)))
    }

    pub fn binary(left: Expr, op: Vec<Token>, right: Expr) -> Self {
        Expr::Binary(Box::new(Binary { left, op, right }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAfterGroup {
    pub group: Token,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupAll {
    pub group: Token,
    pub star: Token,
}

/// Function call. `group` is set for `group:name(..)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub group: Option<Token>,
    pub name: Token,
    /// `DISTINCT` in `count(DISTINCT a)`.
    pub spec: Vec<Token>,
    pub args: Vec<Expr>,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub case: Token,
    pub operand: Option<Expr>,
    pub whens: Vec<CaseWhen>,
    pub else_result: Option<Expr>,
    pub end: Token,
    pub alias: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: Vec<Token>,
    pub operand: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Expr,
    pub op: Vec<Token>,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    pub operand: Expr,
    pub op: Vec<Token>,
    pub low: Expr,
    pub high: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Postfix {
    pub operand: Expr,
    pub op: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub keywords: Vec<Token>,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub keywords: Vec<Token>,
    pub fields: Vec<ColumnField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub limit: Token,
    pub count: Token,
    pub offset: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub keywords: Vec<Token>,
    pub name: Token,
    pub columns: Vec<ColumnDefinition>,
    pub options: Vec<TableOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: Token,
    /// Type name followed by its precision arguments, if any.
    pub data_type: Vec<Token>,
    pub constraints: Vec<Token>,
}

/// `key = 'value'` inside `WITH (..)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOption {
    pub key: Token,
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub keywords: Vec<Token>,
    pub into: Option<TableRef>,
    pub columns: Vec<ColumnField>,
    pub select: Option<Box<Select>>,
    pub values: Vec<ValuesRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuesRow {
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateView {
    pub keywords: Vec<Token>,
    pub name: Token,
    pub select: Box<Select>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetVariables {
    pub set: Token,
    pub assignments: Vec<Assignment>,
}

/// `a.b.c = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: Vec<Token>,
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    pub keywords: Vec<Token>,
    pub name: Vec<Token>,
    pub table: Token,
    pub columns: Vec<IndexColumn>,
    pub where_clause: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: Token,
    pub direction: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunction {
    pub keywords: Vec<Token>,
    pub name: Token,
    pub body: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub update: Token,
    pub table: SourceItem,
    pub set: Vec<UpdateAssignment>,
    pub where_clause: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssignment {
    pub column: ColumnField,
    pub value: Option<ColumnField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    pub keywords: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Other {
    pub words: Vec<Token>,
}
