use crate::{Envelope, GenerateError, Geometry, Result, ScalarValue};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Property(String),
    Literal(ScalarValue),
    Function { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOp {
    #[must_use]
    pub fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialOp {
    Intersects,
    Contains,
    Within,
    Disjoint,
    Touches,
    Crosses,
    Overlaps,
    Equals,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Include,
    Exclude,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Compare {
        op: ComparisonOp,
        left: Expr,
        right: Expr,
    },
    Between {
        expr: Expr,
        lower: Expr,
        upper: Expr,
    },
    IsNull(Expr),
    Like {
        expr: Expr,
        pattern: String,
        match_case: bool,
    },
    Id {
        column: String,
        ids: Vec<ScalarValue>,
    },
    Spatial {
        op: SpatialOp,
        property: String,
        geometry: Geometry,
    },
    BBox {
        property: String,
        envelope: Envelope,
        srid: Option<i32>,
    },
    DWithin {
        property: String,
        geometry: Geometry,
        distance: f64,
    },
    Beyond {
        property: String,
        geometry: Geometry,
        distance: f64,
    },
}

impl Filter {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Include => "Include",
            Self::Exclude => "Exclude",
            Self::And(_) => "And",
            Self::Or(_) => "Or",
            Self::Not(_) => "Not",
            Self::Compare { .. } => "Compare",
            Self::Between { .. } => "Between",
            Self::IsNull(_) => "IsNull",
            Self::Like { .. } => "Like",
            Self::Id { .. } => "Id",
            Self::Spatial { .. } => "Spatial",
            Self::BBox { .. } => "BBox",
            Self::DWithin { .. } => "DWithin",
            Self::Beyond { .. } => "Beyond",
        }
    }

    #[must_use]
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            Self::Spatial { .. } | Self::BBox { .. } | Self::DWithin { .. } | Self::Beyond { .. }
        )
    }
}

/// Visitor turning a filter tree into a SQL predicate. Implementors supply
/// the dialect-specific pieces; the logical structure is rendered by
/// [`encode_filter`].
pub trait FilterToSql {
    fn dialect_name(&self) -> &str;
    fn encode_column(&self, name: &str, sql: &mut String);
    fn encode_literal(&self, value: &ScalarValue, sql: &mut String);
    fn encode_spatial(&self, filter: &Filter, sql: &mut String) -> Result<()>;

    fn encode_function(&self, name: &str, _args: &[Expr], _sql: &mut String) -> Result<()> {
        Err(unsupported(self.dialect_name(), format!("function {name}")))
    }

    fn encode(&self, filter: &Filter, sql: &mut String) -> Result<()> {
        encode_filter(self, filter, sql)
    }

    fn encode_to_string(&self, filter: &Filter) -> Result<String> {
        let mut sql = String::new();
        self.encode(filter, &mut sql)?;
        Ok(sql)
    }
}

pub fn encode_filter<V>(visitor: &V, filter: &Filter, sql: &mut String) -> Result<()>
where
    V: FilterToSql + ?Sized,
{
    match filter {
        Filter::Include => sql.push_str("1 = 1"),
        Filter::Exclude => sql.push_str("0 = 1"),
        Filter::And(children) if children.is_empty() => sql.push_str("1 = 1"),
        Filter::Or(children) if children.is_empty() => sql.push_str("0 = 1"),
        Filter::And(children) => encode_junction(visitor, children, " AND ", sql)?,
        Filter::Or(children) => encode_junction(visitor, children, " OR ", sql)?,
        Filter::Not(child) => {
            sql.push_str("NOT (");
            visitor.encode(child, sql)?;
            sql.push(')');
        }
        Filter::Compare { op, left, right } => {
            encode_expr(visitor, left, sql)?;
            sql.push(' ');
            sql.push_str(op.sql());
            sql.push(' ');
            encode_expr(visitor, right, sql)?;
        }
        Filter::Between { expr, lower, upper } => {
            encode_expr(visitor, expr, sql)?;
            sql.push_str(" BETWEEN ");
            encode_expr(visitor, lower, sql)?;
            sql.push_str(" AND ");
            encode_expr(visitor, upper, sql)?;
        }
        Filter::IsNull(expr) => {
            encode_expr(visitor, expr, sql)?;
            sql.push_str(" IS NULL");
        }
        Filter::Like {
            expr,
            pattern,
            match_case,
        } => {
            let pattern = ScalarValue::Text(pattern.clone());
            if *match_case {
                encode_expr(visitor, expr, sql)?;
                sql.push_str(" LIKE ");
                visitor.encode_literal(&pattern, sql);
            } else {
                sql.push_str("LOWER(");
                encode_expr(visitor, expr, sql)?;
                sql.push_str(") LIKE LOWER(");
                visitor.encode_literal(&pattern, sql);
                sql.push(')');
            }
        }
        Filter::Id { ids, .. } if ids.is_empty() => sql.push_str("0 = 1"),
        Filter::Id { column, ids } => {
            visitor.encode_column(column, sql);
            sql.push_str(" IN (");
            for (index, id) in ids.iter().enumerate() {
                if index > 0 {
                    sql.push_str(", ");
                }
                visitor.encode_literal(id, sql);
            }
            sql.push(')');
        }
        Filter::Spatial { .. }
        | Filter::BBox { .. }
        | Filter::DWithin { .. }
        | Filter::Beyond { .. } => visitor.encode_spatial(filter, sql)?,
    }

    Ok(())
}

pub fn encode_expr<V>(visitor: &V, expr: &Expr, sql: &mut String) -> Result<()>
where
    V: FilterToSql + ?Sized,
{
    match expr {
        Expr::Property(name) => visitor.encode_column(name, sql),
        Expr::Literal(value) => visitor.encode_literal(value, sql),
        Expr::Function { name, args } => visitor.encode_function(name, args, sql)?,
    }
    Ok(())
}

pub fn unsupported(dialect: &str, filter: impl Into<String>) -> crate::Error {
    GenerateError::UnsupportedFilter {
        filter: filter.into(),
        dialect: dialect.to_string(),
    }
    .into()
}

fn encode_junction<V>(
    visitor: &V,
    children: &[Filter],
    separator: &str,
    sql: &mut String,
) -> Result<()>
where
    V: FilterToSql + ?Sized,
{
    sql.push('(');
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            sql.push_str(separator);
        }
        visitor.encode(child, sql)?;
    }
    sql.push(')');
    Ok(())
}
