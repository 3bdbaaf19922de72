use crate::{
    encode::{CompiledJoin, EncodeContext, RawQuery},
    error::EncodeError,
    obs::EncodeTraceEvent,
    query::{AssociationInfo, Clause, ColumnName, QueryAssociation, TableName},
};

impl EncodeContext<'_> {
    /// Resolve an `on` clause into a `$join` descriptor.
    pub(crate) fn encode_join(
        &self,
        table: &TableName,
        conditions: &[Clause],
    ) -> Result<RawQuery, EncodeError> {
        let association = self.find_association(table)?;
        let identity = &self.config.identity_column;

        let map_key = map_key(&association.info, identity);
        let join_key = join_key(&association.info, identity);
        let predicate = self.encode_root_conditions(conditions)?;

        self.trace.on_event(EncodeTraceEvent::JoinResolved {
            table,
            map_key: &map_key,
            join_key: &join_key,
        });

        Ok(RawQuery::Join(Box::new(CompiledJoin {
            table: table.clone(),
            predicate,
            original_conditions: conditions.to_vec(),
            map_key,
            join_key,
        })))
    }

    // Root-level joins are checked against declared join tables upstream,
    // so a miss here means an `on` nested inside and/or.
    fn find_association(&self, table: &TableName) -> Result<&QueryAssociation, EncodeError> {
        let mut matches = self
            .associations
            .iter()
            .filter(|association| association.to == *table);

        let Some(association) = matches.next() else {
            return Err(EncodeError::MissingAssociation {
                table: table.clone(),
            });
        };

        let extra = matches.count();
        if extra > 0 {
            return Err(EncodeError::AmbiguousAssociation {
                table: table.clone(),
                count: extra + 1,
            });
        }

        Ok(association)
    }
}

/// Column of the joined records whose value keys the join map.
fn map_key(info: &AssociationInfo, identity: &ColumnName) -> ColumnName {
    match info {
        AssociationInfo::BelongsTo { .. } => identity.clone(),
        AssociationInfo::HasMany { foreign_key } => foreign_key.clone(),
    }
}

/// Column of the queried records looked up in the join map.
fn join_key(info: &AssociationInfo, identity: &ColumnName) -> ColumnName {
    match info {
        AssociationInfo::BelongsTo { key } => key.clone(),
        AssociationInfo::HasMany { .. } => identity.clone(),
    }
}
