use serde::Serialize;
use tokenbridge_primitives::{
    mapping::{MappingStatus, TokenMappingEntry},
    receipt::ReceiptRecord,
    Address, TimestampMs, U256,
};

use super::{
    helpers::{porcelain_field, porcelain_optional},
    traits::Formattable,
};

#[derive(Serialize)]
pub(crate) struct GuardiansInfo {
    pub(crate) guardians: Vec<Address>,
}

impl Formattable for GuardiansInfo {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("guardians.count", self.guardians.len())];
        output.extend(
            self.guardians
                .iter()
                .enumerate()
                .map(|(i, g)| porcelain_field(&format!("guardians[{i}]"), g)),
        );
        output.join("\n")
    }
}

#[derive(Serialize)]
pub(crate) struct MappingsInfo {
    pub(crate) mappings: Vec<TokenMappingEntry>,
}

impl Formattable for MappingsInfo {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("mappings.count", self.mappings.len())];
        for (i, entry) in self.mappings.iter().enumerate() {
            let p = format!("mappings[{i}]");
            let m = &entry.mapping;
            output.push(porcelain_field(&format!("{p}.standard"), m.standard()));
            output.push(porcelain_field(&format!("{p}.foreign_token"), m.foreign_token()));
            output.push(porcelain_field(&format!("{p}.local_token"), m.local_token()));
            output.push(porcelain_field(&format!("{p}.name"), m.name()));
            output.push(porcelain_field(&format!("{p}.symbol"), m.symbol()));
            output.push(porcelain_optional(&format!("{p}.metadata_uri"), m.metadata_uri()));
            output.push(porcelain_field(&format!("{p}.created_at"), m.created_at()));
            match entry.status {
                MappingStatus::Active => {
                    output.push(porcelain_field(&format!("{p}.status"), "active"));
                }
                MappingStatus::Removed {
                    removed_at,
                    outstanding_at_removal,
                } => {
                    output.push(porcelain_field(&format!("{p}.status"), "removed"));
                    output.push(porcelain_field(&format!("{p}.removed_at"), removed_at));
                    output.push(porcelain_field(
                        &format!("{p}.outstanding_at_removal"),
                        outstanding_at_removal,
                    ));
                }
            }
        }
        output.join("\n")
    }
}

#[derive(Serialize)]
pub(crate) struct SupplyInfo {
    pub(crate) local_token: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) instance_id: Option<U256>,
    pub(crate) outstanding: U256,
}

impl Formattable for SupplyInfo {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("local_token", self.local_token),
            porcelain_optional("instance_id", self.instance_id),
            porcelain_field("outstanding", self.outstanding),
        ]
        .join("\n")
    }
}

#[derive(Serialize)]
pub(crate) struct ReceiptInfo {
    pub(crate) receipt_id: String,
    pub(crate) local_token: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) instance_id: Option<U256>,
    pub(crate) amount: U256,
    pub(crate) consumed_at: TimestampMs,
}

impl From<ReceiptRecord> for ReceiptInfo {
    fn from(r: ReceiptRecord) -> Self {
        Self {
            receipt_id: r.receipt_id.into_inner(),
            local_token: r.local_token,
            instance_id: r.instance_id,
            amount: r.amount,
            consumed_at: r.consumed_at,
        }
    }
}

impl Formattable for ReceiptInfo {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("receipt_id", &self.receipt_id),
            porcelain_field("local_token", self.local_token),
            porcelain_optional("instance_id", self.instance_id),
            porcelain_field("amount", self.amount),
            porcelain_field("consumed_at", self.consumed_at),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use tokenbridge_primitives::{
        mapping::TokenMapping, receipt::ReceiptId, standard::TokenMetadata,
    };

    use super::*;
    use crate::{cli::OutputFormat, output::render};

    #[test]
    fn test_supply_porcelain() {
        let info = SupplyInfo {
            local_token: Address::repeat_byte(0xbb),
            instance_id: None,
            outstanding: U256::from(100),
        };
        assert_eq!(
            info.format_porcelain(),
            format!(
                "local_token: {}\ninstance_id: none\noutstanding: 100",
                Address::repeat_byte(0xbb)
            )
        );

        let json = render(&info, OutputFormat::Json).unwrap();
        assert!(!json.contains("instance_id"));
    }

    #[test]
    fn test_mappings_porcelain_shows_tombstones() {
        let entry = TokenMappingEntry::active(TokenMapping::new(
            Address::repeat_byte(0xaa),
            Address::repeat_byte(0xbb),
            TokenMetadata::fungible("Wrapped Token", "WTK", 18),
            5,
        ));
        let info = MappingsInfo {
            mappings: vec![entry.clone(), entry.tombstoned(9, U256::from(3))],
        };

        let out = info.format_porcelain();
        assert!(out.starts_with("mappings.count: 2"));
        assert!(out.contains("mappings[0].status: active"));
        assert!(out.contains("mappings[1].status: removed"));
        assert!(out.contains("mappings[1].outstanding_at_removal: 3"));
        assert!(out.contains("mappings[0].standard: fungible"));
    }

    #[test]
    fn test_receipt_from_record() {
        let info = ReceiptInfo::from(ReceiptRecord {
            receipt_id: ReceiptId::from("0xfeed:1"),
            local_token: Address::repeat_byte(0xbb),
            instance_id: Some(U256::from(4)),
            amount: U256::from(1),
            consumed_at: 77,
        });
        assert!(info.format_porcelain().contains("receipt_id: 0xfeed:1"));
        assert!(info.format_porcelain().contains("instance_id: 4"));
    }
}
