//! Uniform navigation over the typed tree.
//!
//! `Node` borrows any AST struct (or a leaf token) so generic code can walk the
//! tree without knowing its shape. A `KeyPath` is a list of `Segment`s from
//! the program root down to a node; `Program::get` follows one and
//! `Program::path_of` finds the one leading to a given token.

use crate::parser::ast::*;
use crate::sql::Token;
use itertools::Itertools;

/// One step of a key path: a named field, or an element of a named list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Segment {
    #[display("{_0}")]
    Field(&'static str),
    #[display("{_0}[{_1}]")]
    Item(&'static str, usize),
}

impl Segment {
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Field(name) | Segment::Item(name, _) => name,
        }
    }
}

/// Path from the program root to a node, rendered as `statements[0].from.sources[1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, derive_more::Deref, derive_more::From)]
pub struct KeyPath(Vec<Segment>);

impl KeyPath {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

/// Which statement-like construct a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StatementKind {
    #[display("select")]
    Select,
    #[display("tableSource")]
    TableSource,
    #[display("join")]
    Join,
    #[display("insert")]
    Insert,
    #[display("update")]
    Update,
    #[display("createTable")]
    CreateTable,
    #[display("createView")]
    CreateView,
    #[display("createIndex")]
    CreateIndex,
    #[display("createFunction")]
    CreateFunction,
    #[display("set")]
    Set,
    #[display("show")]
    Show,
    #[display("other")]
    Other,
}

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Select(&'a Select),
    Union(&'a Union),
    From(&'a FromClause),
    TableSource(&'a TableSource),
    Table(&'a TableRef),
    TableName(&'a TableName),
    Join(&'a Join),
    Column(&'a ColumnField),
    Over(&'a Over),
    ColumnAfterGroup(&'a ColumnAfterGroup),
    GroupAll(&'a GroupAll),
    Function(&'a Function),
    Case(&'a Case),
    CaseWhen(&'a CaseWhen),
    Tuple(&'a [Expr]),
    Unary(&'a Unary),
    Binary(&'a Binary),
    Between(&'a Between),
    Postfix(&'a Postfix),
    OrderBy(&'a OrderBy),
    OrderItem(&'a OrderItem),
    GroupBy(&'a GroupBy),
    Limit(&'a Limit),
    CreateTable(&'a CreateTable),
    ColumnDefinition(&'a ColumnDefinition),
    TableOption(&'a TableOption),
    Insert(&'a Insert),
    ValuesRow(&'a ValuesRow),
    CreateView(&'a CreateView),
    Set(&'a SetVariables),
    Assignment(&'a Assignment),
    CreateIndex(&'a CreateIndex),
    IndexColumn(&'a IndexColumn),
    CreateFunction(&'a CreateFunction),
    Update(&'a Update),
    UpdateAssignment(&'a UpdateAssignment),
    Show(&'a Show),
    Other(&'a Other),
    Token(&'a Token),
}

macro_rules! node_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Node<'a> {
                fn from(value: &'a $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

node_from! {
    Program => Program,
    Select => Select,
    Union => Union,
    FromClause => From,
    TableSource => TableSource,
    TableRef => Table,
    TableName => TableName,
    Join => Join,
    ColumnField => Column,
    Over => Over,
    ColumnAfterGroup => ColumnAfterGroup,
    GroupAll => GroupAll,
    Function => Function,
    Case => Case,
    CaseWhen => CaseWhen,
    Unary => Unary,
    Binary => Binary,
    Between => Between,
    Postfix => Postfix,
    OrderBy => OrderBy,
    OrderItem => OrderItem,
    GroupBy => GroupBy,
    Limit => Limit,
    CreateTable => CreateTable,
    ColumnDefinition => ColumnDefinition,
    TableOption => TableOption,
    Insert => Insert,
    ValuesRow => ValuesRow,
    CreateView => CreateView,
    SetVariables => Set,
    Assignment => Assignment,
    CreateIndex => CreateIndex,
    IndexColumn => IndexColumn,
    CreateFunction => CreateFunction,
    Update => Update,
    UpdateAssignment => UpdateAssignment,
    Show => Show,
    Other => Other,
    Token => Token,
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        match statement {
            Statement::Select(s) => Node::Select(s),
            Statement::CreateTable(s) => Node::CreateTable(s),
            Statement::Insert(s) => Node::Insert(s),
            Statement::CreateView(s) => Node::CreateView(s),
            Statement::Set(s) => Node::Set(s),
            Statement::CreateIndex(s) => Node::CreateIndex(s),
            Statement::CreateFunction(s) => Node::CreateFunction(s),
            Statement::Update(s) => Node::Update(s),
            Statement::Show(s) => Node::Show(s),
            Statement::Other(s) => Node::Other(s),
        }
    }
}

impl<'a> From<&'a SourceItem> for Node<'a> {
    fn from(item: &'a SourceItem) -> Self {
        match item {
            SourceItem::Table(table) => Node::Table(table),
            SourceItem::Select(select) => Node::Select(select),
        }
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Token(t) => Node::Token(t),
            Expr::Column(c) => Node::Column(c),
            Expr::ColumnAfterGroup(c) => Node::ColumnAfterGroup(c),
            Expr::GroupAll(g) => Node::GroupAll(g),
            Expr::Function(f) => Node::Function(f),
            Expr::Case(c) => Node::Case(c),
            Expr::Subquery(s) => Node::Select(s),
            Expr::Tuple(items) => Node::Tuple(items),
            Expr::Unary(u) => Node::Unary(u),
            Expr::Binary(b) => Node::Binary(b),
            Expr::Between(b) => Node::Between(b),
            Expr::Postfix(p) => Node::Postfix(p),
        }
    }
}

/// Ordered child list under construction.
#[derive(Default)]
struct Children<'a>(Vec<(Segment, Node<'a>)>);

impl<'a> Children<'a> {
    fn field(mut self, name: &'static str, node: impl Into<Node<'a>>) -> Self {
        self.0.push((Segment::Field(name), node.into()));
        self
    }

    fn opt<N: Into<Node<'a>>>(self, name: &'static str, node: Option<N>) -> Self {
        match node {
            Some(node) => self.field(name, node),
            None => self,
        }
    }

    fn list<T>(mut self, name: &'static str, items: &'a [T]) -> Self
    where
        &'a T: Into<Node<'a>>,
    {
        self.0.extend(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (Segment::Item(name, i), item.into())),
        );
        self
    }
}

impl<'a> Node<'a> {
    /// Direct children in source order.
    pub fn children(self) -> Vec<(Segment, Node<'a>)> {
        let c = Children::default();
        let c = match self {
            Node::Program(p) => c.list("statements", &p.statements),
            Node::Select(s) => c
                .field("select", &s.select)
                .list("spec", &s.spec)
                .list("result", &s.result)
                .opt("from", s.from.as_ref())
                .opt("orderBy", s.order_by.as_ref())
                .opt("limit", s.limit.as_ref())
                .opt("union", s.union.as_ref())
                .opt("alias", s.alias.as_ref()),
            Node::Union(u) => c
                .field("union", &u.union)
                .opt("quantifier", u.quantifier.as_ref())
                .field("select", u.select.as_ref()),
            Node::From(f) => c
                .field("from", &f.from)
                .list("sources", &f.sources)
                .opt("where", f.where_clause.as_ref())
                .opt("groupBy", f.group_by.as_ref())
                .opt("having", f.having.as_ref()),
            Node::TableSource(t) => c.field("source", &t.source).list("joins", &t.joins),
            Node::Table(t) => c.field("name", &t.name).opt("alias", t.alias.as_ref()),
            Node::TableName(t) => c
                .opt("namespace", t.namespace.as_ref())
                .field("table", &t.table),
            Node::Join(j) => c
                .list("keywords", &j.keywords)
                .field("join", &j.join)
                .opt("conditions", j.conditions.as_ref()),
            Node::Column(col) => c
                .list("not", &col.not)
                .field("name", &col.name)
                .opt("over", col.over.as_ref())
                .opt("alias", col.alias.as_ref()),
            Node::Over(o) => c
                .field("over", &o.over)
                .list("partitionBy", &o.partition_by)
                .opt("orderBy", o.order_by.as_ref()),
            Node::ColumnAfterGroup(col) => c.field("group", &col.group).field("name", &col.name),
            Node::GroupAll(g) => c.field("group", &g.group).field("star", &g.star),
            Node::Function(f) => c
                .opt("group", f.group.as_ref())
                .field("name", &f.name)
                .list("spec", &f.spec)
                .list("args", &f.args)
                .opt("filter", f.filter.as_ref()),
            Node::Case(case) => c
                .field("case", &case.case)
                .opt("operand", case.operand.as_ref())
                .list("whens", &case.whens)
                .opt("else", case.else_result.as_ref())
                .field("end", &case.end)
                .opt("alias", case.alias.as_ref()),
            Node::CaseWhen(w) => c.field("condition", &w.condition).field("result", &w.result),
            Node::Tuple(items) => c.list("items", items),
            Node::Unary(u) => c.list("op", &u.op).field("operand", &u.operand),
            Node::Binary(b) => c
                .field("left", &b.left)
                .list("op", &b.op)
                .field("right", &b.right),
            Node::Between(b) => c
                .field("operand", &b.operand)
                .list("op", &b.op)
                .field("low", &b.low)
                .field("high", &b.high),
            Node::Postfix(p) => c.field("operand", &p.operand).list("op", &p.op),
            Node::OrderBy(o) => c.list("keywords", &o.keywords).list("items", &o.items),
            Node::OrderItem(o) => c
                .field("expr", &o.expr)
                .opt("direction", o.direction.as_ref()),
            Node::GroupBy(g) => c.list("keywords", &g.keywords).list("fields", &g.fields),
            Node::Limit(l) => c
                .field("limit", &l.limit)
                .field("count", &l.count)
                .opt("offset", l.offset.as_ref()),
            Node::CreateTable(t) => c
                .list("keywords", &t.keywords)
                .field("name", &t.name)
                .list("columns", &t.columns)
                .list("options", &t.options),
            Node::ColumnDefinition(d) => c
                .field("name", &d.name)
                .list("dataType", &d.data_type)
                .list("constraints", &d.constraints),
            Node::TableOption(o) => c.field("key", &o.key).field("value", &o.value),
            Node::Insert(i) => c
                .list("keywords", &i.keywords)
                .opt("into", i.into.as_ref())
                .list("columns", &i.columns)
                .opt("select", i.select.as_deref())
                .list("values", &i.values),
            Node::ValuesRow(r) => c.list("values", &r.values),
            Node::CreateView(v) => c
                .list("keywords", &v.keywords)
                .field("name", &v.name)
                .field("select", v.select.as_ref()),
            Node::Set(s) => c.field("set", &s.set).list("assignments", &s.assignments),
            Node::Assignment(a) => c.list("name", &a.name).field("value", &a.value),
            Node::CreateIndex(i) => c
                .list("keywords", &i.keywords)
                .list("name", &i.name)
                .field("table", &i.table)
                .list("columns", &i.columns)
                .opt("where", i.where_clause.as_ref()),
            Node::IndexColumn(i) => c
                .field("name", &i.name)
                .opt("direction", i.direction.as_ref()),
            Node::CreateFunction(f) => c
                .list("keywords", &f.keywords)
                .field("name", &f.name)
                .field("body", &f.body),
            Node::Update(u) => c
                .field("update", &u.update)
                .field("table", &u.table)
                .list("set", &u.set)
                .opt("where", u.where_clause.as_ref()),
            Node::UpdateAssignment(a) => c.field("column", &a.column).opt("value", a.value.as_ref()),
            Node::Show(s) => c.list("keywords", &s.keywords),
            Node::Other(o) => c.list("words", &o.words),
            Node::Token(_) => c,
        };
        c.0
    }

    pub fn child(self, segment: Segment) -> Option<Node<'a>> {
        self.children()
            .into_iter()
            .find_map(|(s, node)| (s == segment).then_some(node))
    }

    pub fn as_token(self) -> Option<&'a Token> {
        match self {
            Node::Token(t) => Some(t),
            _ => None,
        }
    }

    /// Set for nodes the reader treats as statements when resolving fields.
    pub fn statement_kind(self) -> Option<StatementKind> {
        Some(match self {
            Node::Select(_) => StatementKind::Select,
            Node::TableSource(_) => StatementKind::TableSource,
            Node::Join(_) => StatementKind::Join,
            Node::Insert(_) => StatementKind::Insert,
            Node::Update(_) => StatementKind::Update,
            Node::CreateTable(_) => StatementKind::CreateTable,
            Node::CreateView(_) => StatementKind::CreateView,
            Node::CreateIndex(_) => StatementKind::CreateIndex,
            Node::CreateFunction(_) => StatementKind::CreateFunction,
            Node::Set(_) => StatementKind::Set,
            Node::Show(_) => StatementKind::Show,
            Node::Other(_) => StatementKind::Other,
            _ => return None,
        })
    }
}

impl Program {
    pub fn get(&self, path: &[Segment]) -> Option<Node<'_>> {
        path.iter()
            .try_fold(Node::Program(self), |node, segment| node.child(*segment))
    }

    /// Path to the leaf occupying the same span as `token`.
    pub fn path_of(&self, token: &Token) -> Option<KeyPath> {
        fn walk(node: Node<'_>, token: &Token, path: &mut Vec<Segment>) -> bool {
            if let Node::Token(t) = node {
                return t.kind == token.kind && t.start == token.start && t.end == token.end;
            }
            for (segment, child) in node.children() {
                path.push(segment);
                if walk(child, token, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(Node::Program(self), token, &mut path).then(|| KeyPath::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::TokenKind;

    fn word(text: &str, start: usize) -> Token {
        Token::new(TokenKind::Word, text, start)
    }

    fn program() -> Program {
        let table = TableRef {
            name: TableName {
                namespace: Some(word("db", 14)),
                table: word("users", 17),
            },
            alias: Some(word("u", 23)),
        };
        Program {
            statements: vec![Statement::Select(Box::new(Select {
                select: word("select", 0),
                spec: vec![],
                result: vec![ColumnField::new(Expr::Token(word("id", 7)))],
                from: Some(FromClause {
                    from: word("from", 9),
                    sources: vec![TableSource {
                        source: SourceItem::Table(table),
                        joins: vec![],
                    }],
                    where_clause: None,
                    group_by: None,
                    having: None,
                }),
                order_by: None,
                limit: None,
                union: None,
                alias: None,
            }))],
        }
    }

    #[test]
    fn path_of_and_get_agree() {
        let ast = program();
        let token = word("users", 17);
        let path = ast.path_of(&token).expect("token is in the tree");
        assert_eq!(path.to_string(), "statements[0].from.sources[0].source.name.table");
        let found = ast.get(&path).and_then(Node::as_token);
        assert_eq!(found, Some(&token));
    }

    #[test]
    fn wrappers_are_transparent() {
        let ast = program();
        let path = [Segment::Item("statements", 0)];
        assert_eq!(
            ast.get(&path).and_then(Node::statement_kind),
            Some(StatementKind::Select)
        );
        let path = ast.path_of(&word("id", 7)).expect("id is in the tree");
        assert_eq!(path.to_string(), "statements[0].result[0].name");
    }

    #[test]
    fn missing_paths() {
        let ast = program();
        assert!(ast.path_of(&word("nope", 99)).is_none());
        assert!(ast.get(&[Segment::Item("statements", 3)]).is_none());
        assert!(ast.get(&[Segment::Field("nope")]).is_none());
    }

    #[test]
    fn segment_names() {
        assert_eq!(Segment::Item("sources", 2).to_string(), "sources[2]");
        assert_eq!(Segment::Item("sources", 2).name(), "sources");
        assert_eq!(Segment::Field("alias").name(), "alias");
    }
}
