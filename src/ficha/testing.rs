//! Test support: the canonical two-team registry and sources used across the
//! unit and integration suites.
//!
//! Tests build their registries here instead of ad hoc, so roster numbers in
//! test sources always line up with one well-known pair of rosters.

use crate::ficha::registry::{Registry, TeamBuilder};

/// A registry with BAR and RMA, rosters deep enough for full lineups.
///
/// BAR's number 9 is Lewandowski; tests lean on that.
pub fn liga_registry() -> Registry {
    let mut registry = Registry::new();

    let bar = TeamBuilder::new()
        .name("FC Barcelona")
        .and_then(|b| b.code("BAR"))
        .and_then(|b| b.player(1, "Ter Stegen"))
        .and_then(|b| b.player(2, "Kounde"))
        .and_then(|b| b.player(3, "Balde"))
        .and_then(|b| b.player(4, "Araujo"))
        .and_then(|b| b.player(5, "Christensen"))
        .and_then(|b| b.player(6, "Gavi"))
        .and_then(|b| b.player(8, "Pedri"))
        .and_then(|b| b.player(9, "Lewandowski"))
        .and_then(|b| b.player(11, "Raphinha"))
        .and_then(|b| b.player(13, "Pena"))
        .and_then(|b| b.player(14, "Joao Felix"))
        .and_then(|b| b.player(18, "Romeu"))
        .and_then(|b| b.player(20, "Roberto"))
        .and_then(|b| b.player(21, "De Jong"))
        .and_then(|b| b.build())
        .expect("BAR fixture roster is valid");

    let rma = TeamBuilder::new()
        .name("Real Madrid")
        .and_then(|b| b.code("RMA"))
        .and_then(|b| b.player(1, "Courtois"))
        .and_then(|b| b.player(2, "Carvajal"))
        .and_then(|b| b.player(3, "Militao"))
        .and_then(|b| b.player(4, "Alaba"))
        .and_then(|b| b.player(5, "Bellingham"))
        .and_then(|b| b.player(6, "Camavinga"))
        .and_then(|b| b.player(7, "Vinicius"))
        .and_then(|b| b.player(8, "Kroos"))
        .and_then(|b| b.player(9, "Joselu"))
        .and_then(|b| b.player(10, "Modric"))
        .and_then(|b| b.player(13, "Lunin"))
        .and_then(|b| b.player(15, "Valverde"))
        .and_then(|b| b.player(18, "Tchouameni"))
        .and_then(|b| b.player(24, "Rudiger"))
        .and_then(|b| b.build())
        .expect("RMA fixture roster is valid");

    registry.register(bar).expect("BAR registers");
    registry.register(rma).expect("RMA registers");
    registry
}

/// Two consecutive matches in one stream: BAR 2-1 RMA, then RMA 1-1 BAR.
///
/// Scorer totals: BAR #9 twice, RMA #7 twice, BAR #11 once.
pub fn two_matches_source() -> &'static str {
    "\
FECHA: 15/10/2023
EQUIPO LOCAL: BAR
EQUIPO VISITANTE: RMA
FORMACION LOCAL: 4-3-3
FORMACION VISITANTE: 4-4-2
TITULARES LOCAL: 1,2,3,4,5,6,8,9,11,14,21
TITULARES VISITANTE: 1,2,3,4,5,6,8,10,7,9,15
BANCO LOCAL: 13,18,20
BANCO VISITANTE: 13,18,24
GOL: BAR, 25, 9, 8
GOL: RMA, 80, 7
GOL: BAR, 88, 9
FECHA: 22/10/2023
EQUIPO LOCAL: RMA
EQUIPO VISITANTE: BAR
FORMACION LOCAL: 4-4-2
FORMACION VISITANTE: 4-3-3
TITULARES LOCAL: 1,2,3,4,5,6,8,10,7,9,15
TITULARES VISITANTE: 1,2,3,4,5,6,8,9,11,14,21
BANCO LOCAL: 13,18,24
BANCO VISITANTE: 13,18,20
GOL: RMA, 30, 7
GOL: BAR, 75, 11
"
}
