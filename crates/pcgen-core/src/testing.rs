//! Fixtures for tests and demos.

use crate::catalog::{AccountBook, Catalog, Program, ProgramTable, QrisEntry, QrisTable, SiteConfig};

/// A small catalog: programs `zakat` (no poster) and `sumur` (poster),
/// regions `Jakarta` (QRIS available) and `Bandung` (none).
pub fn sample_catalog() -> Catalog {
    let config = SiteConfig {
        base_url: "https://donasi.example".into(),
        default_confirmation: "0812xxxxxxx".into(),
        accounts: AccountBook {
            bsi: "7123456789".into(),
            bsi_holder: "Yayasan Peduli".into(),
            mandiri: "1330012345678".into(),
            mandiri_holder: "Yayasan Peduli".into(),
        },
    };

    let mut programs = ProgramTable::new();
    programs.insert(
        "zakat".into(),
        Program {
            name: "Zakat Maal".into(),
            path: "/zakat".into(),
            template: "Ini link Anda: {LINK}".into(),
            poster_drive_id: None,
        },
    );
    programs.insert(
        "sumur".into(),
        Program {
            name: "Sedekah Sumur".into(),
            path: "/sumur".into(),
            template: "Bantu saudara kita mendapat air bersih.\n\nDonasi di sini: {LINK}".into(),
            poster_drive_id: Some("poster-sumur-01".into()),
        },
    );

    let mut qris = QrisTable::new();
    qris.insert(
        "Jakarta".into(),
        QrisEntry {
            drive_id: Some("qris-jkt-01".into()),
        },
    );
    qris.insert("Bandung".into(), QrisEntry { drive_id: None });

    Catalog::new(config, programs, qris)
}
