//! Tax-unit partitioning.
//!
//! A household files as one primary tax unit (the head, their spouse and
//! everyone absorbed as a dependent) plus zero or more secondary units for
//! adults who would file on their own: an adult child earning too much to be
//! claimed, or a parent or grandparent couple living with the head.
//!
//! The structure is derived fresh for every screening run and never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Household, HouseholdMember, MemberId, Relationship};

/// Couples in a household, keyed by both partners.
pub type RelationshipMap = BTreeMap<MemberId, MemberId>;

/// Engine entity key of the primary tax unit.
pub const PRIMARY_TAX_UNIT_KEY: &str = "tax_unit";

/// A member's role inside the tax unit that contains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxUnitRole {
    /// Files the return.
    Head,
    /// Files jointly with the head.
    Spouse,
    /// Claimed by the head.
    Dependent,
}

/// One tax unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxUnit {
    /// The filer, if any.
    pub head: Option<MemberId>,
    /// The filer's spouse, if any.
    pub spouse: Option<MemberId>,
    /// Members claimed by the head.
    pub dependents: Vec<MemberId>,
}

impl TaxUnit {
    /// Creates a unit headed by `head`.
    pub fn headed_by(head: MemberId) -> Self {
        Self {
            head: Some(head),
            ..Self::default()
        }
    }

    /// Returns true if the unit has nobody in it.
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.spouse.is_none() && self.dependents.is_empty()
    }

    /// Returns every member of the unit, head first.
    pub fn members(&self) -> Vec<MemberId> {
        self.head
            .into_iter()
            .chain(self.spouse)
            .chain(self.dependents.iter().copied())
            .collect()
    }

    /// Returns the role `id` plays in this unit.
    pub fn role_of(&self, id: MemberId) -> Option<TaxUnitRole> {
        if self.head == Some(id) {
            Some(TaxUnitRole::Head)
        } else if self.spouse == Some(id) {
            Some(TaxUnitRole::Spouse)
        } else if self.dependents.contains(&id) {
            Some(TaxUnitRole::Dependent)
        } else {
            None
        }
    }
}

/// The primary tax unit and every secondary unit of a household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxUnitStructure {
    /// The head's unit.
    pub primary: TaxUnit,
    /// Units filing separately from the head.
    pub secondary: Vec<TaxUnit>,
}

impl TaxUnitStructure {
    /// Returns every non-empty unit with its engine entity key, primary first.
    pub fn units(&self) -> Vec<(String, &TaxUnit)> {
        std::iter::once(&self.primary)
            .chain(self.secondary.iter())
            .enumerate()
            .filter(|(_, unit)| !unit.is_empty())
            .map(|(index, unit)| (entity_key(index), unit))
            .collect()
    }

    /// Returns the entity key and unit containing `id`.
    pub fn unit_of(&self, id: MemberId) -> Option<(String, &TaxUnit)> {
        self.units()
            .into_iter()
            .find(|(_, unit)| unit.role_of(id).is_some())
    }

    /// Returns the role `id` plays in whichever unit contains them.
    pub fn role_of(&self, id: MemberId) -> Option<TaxUnitRole> {
        self.unit_of(id).and_then(|(_, unit)| unit.role_of(id))
    }
}

/// Returns the engine entity key of the unit at `index` (0 is the primary unit).
pub fn entity_key(index: usize) -> String {
    if index == 0 {
        PRIMARY_TAX_UNIT_KEY.to_string()
    } else {
        format!("{}_{}", PRIMARY_TAX_UNIT_KEY, index + 1)
    }
}

/// Pairs the couples living in the household.
///
/// The head is paired with the first spouse or domestic partner. Parents are
/// paired with parents and grandparents with grandparents, in entry order.
pub fn relationship_map(household: &Household) -> RelationshipMap {
    let mut map = RelationshipMap::new();

    let head = household.head();
    let spouse = household.members.iter().find(|m| m.is_spouse());
    if let (Some(head), Some(spouse)) = (head, spouse) {
        map.insert(head.id, spouse.id);
        map.insert(spouse.id, head.id);
    }

    for relationship in [Relationship::Parent, Relationship::GrandParent] {
        let ids: Vec<MemberId> = household
            .members
            .iter()
            .filter(|m| m.relationship == relationship)
            .map(|m| m.id)
            .collect();
        for pair in ids.chunks_exact(2) {
            map.insert(pair[0], pair[1]);
            map.insert(pair[1], pair[0]);
        }
    }

    map
}

/// Partitions a household into tax units.
///
/// Members who are neither the head, the head's spouse, nor a dependent of
/// the head are candidates for secondary units. Candidates are taken oldest
/// first, with the lowest member id winning a tie on age:
///
/// - the first candidate heads the first secondary unit, joined by their
///   partner as spouse when the partner is also a candidate;
/// - a later candidate whose partner is still unplaced forms a new unit with
///   the partner, the older of the two as head;
/// - any other candidate is claimed as a dependent of the first secondary unit.
///
/// Everyone else belongs to the primary unit. A household without a head has
/// no tax units at all.
///
/// # Examples
///
/// ```
/// use eligibility_engine::models::{Household, HouseholdMember, MemberId, Relationship};
/// use eligibility_engine::tax_unit::partition;
///
/// let household = Household::new("screen-1", "MA", 3)
///     .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 40))
///     .with_member(HouseholdMember::new(MemberId(2), Relationship::GrandParent, 65))
///     .with_member(HouseholdMember::new(MemberId(3), Relationship::GrandParent, 63));
///
/// let structure = partition(&household);
/// assert_eq!(structure.secondary[0].head, Some(MemberId(2)));
/// assert_eq!(structure.secondary[0].spouse, Some(MemberId(3)));
/// ```
pub fn partition(household: &Household) -> TaxUnitStructure {
    let Some(head) = household.head() else {
        return TaxUnitStructure::default();
    };
    let spouse = household.members.iter().find(|m| m.is_spouse());

    let mut primary = TaxUnit::headed_by(head.id);
    primary.spouse = spouse.map(|s| s.id);

    let mut candidates: Vec<&HouseholdMember> = household
        .members
        .iter()
        .filter(|m| primary.role_of(m.id).is_none() && !household.is_dependent(m))
        .collect();
    candidates.sort_by(|a, b| b.age.cmp(&a.age).then(a.id.cmp(&b.id)));

    let partners = relationship_map(household);
    let mut remaining: Vec<MemberId> = candidates.iter().map(|m| m.id).collect();
    let mut secondary: Vec<TaxUnit> = Vec::new();

    while !remaining.is_empty() {
        let next = remaining.remove(0);
        let partner = partners
            .get(&next)
            .and_then(|p| remaining.iter().position(|id| id == p))
            .map(|index| remaining.remove(index));

        match partner {
            None if !secondary.is_empty() => secondary[0].dependents.push(next),
            partner => secondary.push(TaxUnit {
                head: Some(next),
                spouse: partner,
                dependents: Vec::new(),
            }),
        }
    }

    let placed: Vec<MemberId> = secondary.iter().flat_map(TaxUnit::members).collect();
    primary.dependents = household
        .members
        .iter()
        .map(|m| m.id)
        .filter(|id| primary.role_of(*id).is_none() && !placed.contains(id))
        .collect();

    TaxUnitStructure { primary, secondary }
}
