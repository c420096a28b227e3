//! Module (token) catalog: the drawable items and their economy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a module within a single run.
///
/// Ids are assigned monotonically: the starting bag uses 1-5 and every
/// purchase takes the next free id. Ids are never reused inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module-{}", self.0)
    }
}

/// The closed set of module kinds a player can draw or buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    /// Baseline flux generator.
    FluxCoil,
    /// Dual-yield relay: modest flux, good credits.
    SponsoredRelay,
    /// Lowers accumulated instability when drawn.
    Stabilizer,
    /// High flux yield at double the instability.
    VolatileLens,
    /// Win-condition module; banking enough in one round completes the protocol.
    WarpCore,
}

impl ModuleKind {
    /// Every kind, in shop display order.
    pub const ALL: [ModuleKind; 5] = [
        ModuleKind::FluxCoil,
        ModuleKind::SponsoredRelay,
        ModuleKind::Stabilizer,
        ModuleKind::VolatileLens,
        ModuleKind::WarpCore,
    ];

    /// Human-readable display name.
    pub fn display_name(self) -> &'static str {
        match self {
            ModuleKind::FluxCoil => "Flux Coil",
            ModuleKind::SponsoredRelay => "Sponsored Relay",
            ModuleKind::Stabilizer => "Stabilizer",
            ModuleKind::VolatileLens => "Volatile Lens",
            ModuleKind::WarpCore => "Warp Core",
        }
    }

    /// Flux price in the shop.
    pub fn cost_flux(self) -> u32 {
        match self {
            ModuleKind::FluxCoil => 3,
            ModuleKind::SponsoredRelay => 5,
            ModuleKind::Stabilizer => 4,
            ModuleKind::VolatileLens => 7,
            ModuleKind::WarpCore => 10,
        }
    }

    /// Credit price in the shop. Currently every kind is paid in flux alone;
    /// credits are reserved for upgrades.
    pub fn cost_credits(self) -> u32 {
        0
    }

    /// Informational tier (1-3).
    pub fn tier(self) -> u8 {
        match self {
            ModuleKind::FluxCoil | ModuleKind::SponsoredRelay | ModuleKind::Stabilizer => 1,
            ModuleKind::VolatileLens => 2,
            ModuleKind::WarpCore => 3,
        }
    }

    /// Flux yielded when drawn.
    pub fn gen_flux(self) -> u32 {
        match self {
            ModuleKind::FluxCoil => 2,
            ModuleKind::SponsoredRelay => 1,
            ModuleKind::Stabilizer => 0,
            ModuleKind::VolatileLens => 4,
            ModuleKind::WarpCore => 1,
        }
    }

    /// Credits yielded when drawn.
    pub fn gen_credits(self) -> u32 {
        match self {
            ModuleKind::SponsoredRelay => 2,
            _ => 0,
        }
    }

    /// Signed instability contribution when drawn. Stabilizers are the only
    /// negative entry.
    pub fn add_instability(self) -> i32 {
        match self {
            ModuleKind::FluxCoil | ModuleKind::SponsoredRelay => 1,
            ModuleKind::Stabilizer => -1,
            ModuleKind::VolatileLens | ModuleKind::WarpCore => 2,
        }
    }

    /// Whether the kind is sponsor-funded.
    pub fn sponsored(self) -> bool {
        self == ModuleKind::SponsoredRelay
    }

    /// Whether the kind counts toward the win condition.
    pub fn is_warp_core(self) -> bool {
        self == ModuleKind::WarpCore
    }
}

/// An immutable drawable token.
///
/// The flat attribute record the presentation layer renders. All values are
/// fixed by the kind at construction; only the id varies between two modules
/// of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Run-unique identifier.
    pub id: ModuleId,
    /// Display name.
    pub name: &'static str,
    /// Catalog kind.
    pub kind: ModuleKind,
    /// Informational tier (1-3).
    pub tier: u8,
    /// Flux price in the shop.
    pub cost_flux: u32,
    /// Credit price in the shop.
    pub cost_credits: u32,
    /// Flux yielded when drawn.
    pub gen_flux: u32,
    /// Credits yielded when drawn.
    pub gen_credits: u32,
    /// Signed instability contribution when drawn.
    pub add_instability: i32,
    /// Sponsor-funded flag.
    pub sponsored: bool,
    /// Win-condition flag.
    pub is_warp_core: bool,
}

impl Module {
    /// Pure factory: build a module of `kind` with the supplied id.
    pub fn new(kind: ModuleKind, id: ModuleId) -> Self {
        Self {
            id,
            name: kind.display_name(),
            kind,
            tier: kind.tier(),
            cost_flux: kind.cost_flux(),
            cost_credits: kind.cost_credits(),
            gen_flux: kind.gen_flux(),
            gen_credits: kind.gen_credits(),
            add_instability: kind.add_instability(),
            sponsored: kind.sponsored(),
            is_warp_core: kind.is_warp_core(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_displays_with_prefix() {
        assert_eq!(ModuleId(6).to_string(), "module-6");
    }

    #[test]
    fn catalog_matches_economy_table() {
        let coil = Module::new(ModuleKind::FluxCoil, ModuleId(1));
        assert_eq!(coil.name, "Flux Coil");
        assert_eq!(coil.tier, 1);
        assert_eq!(coil.cost_flux, 3);
        assert_eq!((coil.gen_flux, coil.gen_credits), (2, 0));
        assert_eq!(coil.add_instability, 1);
        assert!(!coil.sponsored && !coil.is_warp_core);

        let relay = Module::new(ModuleKind::SponsoredRelay, ModuleId(2));
        assert_eq!(relay.cost_flux, 5);
        assert_eq!((relay.gen_flux, relay.gen_credits), (1, 2));
        assert!(relay.sponsored);

        let stabilizer = Module::new(ModuleKind::Stabilizer, ModuleId(3));
        assert_eq!(stabilizer.cost_flux, 4);
        assert_eq!(stabilizer.add_instability, -1);

        let lens = Module::new(ModuleKind::VolatileLens, ModuleId(4));
        assert_eq!(lens.tier, 2);
        assert_eq!(lens.cost_flux, 7);
        assert_eq!((lens.gen_flux, lens.add_instability), (4, 2));

        let core = Module::new(ModuleKind::WarpCore, ModuleId(5));
        assert_eq!(core.tier, 3);
        assert_eq!(core.cost_flux, 10);
        assert_eq!((core.gen_flux, core.add_instability), (1, 2));
        assert!(core.is_warp_core);
    }

    #[test]
    fn only_stabilizer_reduces_instability() {
        for kind in ModuleKind::ALL {
            let module = Module::new(kind, ModuleId(9));
            if kind == ModuleKind::Stabilizer {
                assert!(module.add_instability < 0);
            } else {
                assert!(module.add_instability > 0);
            }
        }
    }

    #[test]
    fn kind_serde_names_are_kebab_case() {
        let json = serde_json::to_string(&ModuleKind::SponsoredRelay).unwrap();
        assert_eq!(json, "\"sponsored-relay\"");
        let kind: ModuleKind = serde_json::from_str("\"warp-core\"").unwrap();
        assert_eq!(kind, ModuleKind::WarpCore);
    }
}
