//! Static checks over a keymap table, independent of the table itself.

use keyberon::action::Action;
use keyberon::layout::Layers;

use crate::action::CustomAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeymapError {
    #[error("layer {layer} ({row}, {col}) targets layer {target} which does not exist")]
    MissingLayer {
        layer: usize,
        row: usize,
        col: usize,
        target: usize,
    },
    #[error("base layer ({row}, {col}) is transparent")]
    TransparentBase { row: usize, col: usize },
    #[error("layer {layer} maps ({row}, {col}) which has no switch")]
    Unwired { layer: usize, row: usize, col: usize },
    #[error("layer {layer} cannot be reached from the base layer")]
    Unreachable { layer: usize },
}

/// Calls `f` with every layer `action` can activate, hold and tap alike.
pub fn layer_targets(action: &Action<CustomAction>, f: &mut impl FnMut(usize)) {
    match action {
        Action::Layer(layer) | Action::DefaultLayer(layer) => f(*layer),
        Action::HoldTap(ht) => {
            layer_targets(&ht.hold, f);
            layer_targets(&ht.tap, f);
        }
        Action::MultipleActions(actions) => {
            for action in actions.iter() {
                layer_targets(action, f);
            }
        }
        _ => {}
    }
}

/// Layers reachable from layer 0 by following layer actions.
pub fn reachable_layers<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L, CustomAction>,
) -> [bool; L] {
    let mut reachable = [false; L];
    match reachable.first_mut() {
        Some(base) => *base = true,
        None => return reachable,
    }
    loop {
        let mut changed = false;
        for (index, layer) in layers.iter().enumerate() {
            if !reachable[index] {
                continue;
            }
            for action in layer.iter().flatten() {
                layer_targets(action, &mut |target| {
                    if target < L && !reachable[target] {
                        reachable[target] = true;
                        changed = true;
                    }
                });
            }
        }
        if !changed {
            return reachable;
        }
    }
}

/// The action `(row, col)` produces while `layer` is the active layer.
///
/// Transparent actions fall through to the base layer, as keyberon does.
pub fn resolve<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L, CustomAction>,
    layer: usize,
    row: usize,
    col: usize,
) -> &Action<CustomAction> {
    match &layers[layer][row][col] {
        Action::Trans => &layers[0][row][col],
        action => action,
    }
}

/// Checks that every layer target exists, that the base layer resolves on
/// its own, that unwired positions stay `NoOp` and that every layer is
/// reachable.
pub fn validate<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L, CustomAction>,
    wired: &[[bool; C]; R],
) -> Result<(), KeymapError> {
    for (layer, grid) in layers.iter().enumerate() {
        for (row, keys) in grid.iter().enumerate() {
            for (col, action) in keys.iter().enumerate() {
                let mut missing = None;
                layer_targets(action, &mut |target| {
                    if target >= L && missing.is_none() {
                        missing = Some(target);
                    }
                });
                if let Some(target) = missing {
                    return Err(KeymapError::MissingLayer {
                        layer,
                        row,
                        col,
                        target,
                    });
                }
            }
        }
    }

    if let Some(base) = layers.first() {
        for (row, keys) in base.iter().enumerate() {
            for (col, action) in keys.iter().enumerate() {
                if matches!(action, Action::Trans) {
                    return Err(KeymapError::TransparentBase { row, col });
                }
            }
        }
    }

    for (layer, grid) in layers.iter().enumerate() {
        for (row, keys) in grid.iter().enumerate() {
            for (col, action) in keys.iter().enumerate() {
                if !wired[row][col] && !matches!(action, Action::NoOp | Action::Trans) {
                    return Err(KeymapError::Unwired { layer, row, col });
                }
            }
        }
    }

    match reachable_layers(layers).iter().position(|r| !r) {
        Some(layer) => Err(KeymapError::Unreachable { layer }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyberon::action::{k, l, HoldTapAction, HoldTapConfig};
    use keyberon::key_code::KeyCode::*;

    const ALL_WIRED: [[bool; 2]; 1] = [[true, true]];

    static VALID: Layers<2, 1, 3, CustomAction> = [
        [[
            Action::HoldTap(&HoldTapAction {
                timeout: 200,
                hold: l(1),
                tap: k(Space),
                config: HoldTapConfig::Default,
                tap_hold_interval: 0,
            }),
            k(A),
        ]],
        [[Action::Trans, l(2)]],
        [[k(B), Action::Trans]],
    ];

    #[test]
    fn layer_targets_look_inside_hold_taps() {
        let mut targets = Vec::new();
        layer_targets(&VALID[0][0][0], &mut |t| targets.push(t));
        assert_eq!(targets, [1]);

        targets.clear();
        layer_targets(&VALID[0][0][1], &mut |t| targets.push(t));
        assert!(targets.is_empty());
    }

    #[test]
    fn reachability_is_transitive() {
        assert_eq!(reachable_layers(&VALID), [true, true, true]);
    }

    #[test]
    fn transparent_falls_back_to_base() {
        assert!(matches!(resolve(&VALID, 1, 0, 0), Action::HoldTap(_)));
        assert!(matches!(resolve(&VALID, 2, 0, 1), Action::KeyCode(A)));
        assert!(matches!(resolve(&VALID, 2, 0, 0), Action::KeyCode(B)));
    }

    #[test]
    fn valid_table_passes() {
        assert_eq!(validate(&VALID, &ALL_WIRED), Ok(()));
    }

    #[test]
    fn missing_layer_is_reported() {
        static LAYERS: Layers<2, 1, 2, CustomAction> = [[[l(1), l(2)]], [[k(A), k(B)]]];
        assert_eq!(
            validate(&LAYERS, &ALL_WIRED),
            Err(KeymapError::MissingLayer {
                layer: 0,
                row: 0,
                col: 1,
                target: 2
            })
        );
    }

    #[test]
    fn transparent_base_is_reported() {
        static LAYERS: Layers<2, 1, 1, CustomAction> = [[[k(A), Action::Trans]]];
        assert_eq!(
            validate(&LAYERS, &ALL_WIRED),
            Err(KeymapError::TransparentBase { row: 0, col: 1 })
        );
    }

    #[test]
    fn unwired_position_must_stay_empty() {
        static LAYERS: Layers<2, 1, 2, CustomAction> =
            [[[l(1), Action::NoOp]], [[Action::Trans, k(C)]]];
        assert_eq!(
            validate(&LAYERS, &[[true, false]]),
            Err(KeymapError::Unwired {
                layer: 1,
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn unreachable_layer_is_reported() {
        static LAYERS: Layers<2, 1, 3, CustomAction> =
            [[[l(1), k(A)]], [[k(B), k(C)]], [[k(D), k(E)]]];
        assert_eq!(
            validate(&LAYERS, &ALL_WIRED),
            Err(KeymapError::Unreachable { layer: 2 })
        );
    }
}
