//! # Seam Agreement Test
//!
//! Two supertiles sharing an edge are generated independently. The word
//! crossing that edge must still read as one word: the canonical side's
//! anchor holds the glyph just before the cut, the other side's anchor the
//! glyph just after it.

mod common;

use hexlex_core::Seed;
use hexlex_lexicon::DomainSource;
use hexlex_procedural::assignment::choose_word;
use hexlex_procedural::supertile::colors;
use hexlex_procedural::{ContextKey, Dimension, GeneratorConfig, UltratileContext};
use hexlex_shared::{Socket, SocketRef, SupergridPosition};

const KEY: &str = "base/full";

#[test]
fn test_anchor_glyphs_split_the_same_word() {
    let config = GeneratorConfig::test();
    let mut world = common::world(42, config.clone());
    let lexicon = common::lexicon();
    let domain = lexicon.lookup_domain("base").ready().unwrap();
    let seed = Dimension::parse_key(KEY)
        .unwrap()
        .generation_seed(Seed::new(42), config.dimension_seed_rounds);

    let tiles = [
        SupergridPosition::new(0, 0),
        SupergridPosition::new(11, 3),
        SupergridPosition::new(-7, 12),
        SupergridPosition::new(35, -40),
    ];
    let mut checked = 0;
    for position in tiles {
        for socket in Socket::ALL {
            let here = SocketRef::new(position, socket);
            let owner = here.canonical();
            let context = UltratileContext::compute(
                &ContextKey::new(seed, owner.supertile.ultragrid()),
                &config,
            );
            let slot = here.slot();
            let offset = context.offset(slot.index_in_ultratile());
            if offset != 0 {
                // Borrowed words are covered by the multiplanar test below.
                continue;
            }
            let word = choose_word(
                &domain,
                context.slot_kind(slot.index_in_ultratile()),
                slot,
                context.region_seed(),
                &config,
            )
            .unwrap();

            let across = here.across();
            let mine = common::generate(&mut world, KEY, position);
            let theirs = common::generate(&mut world, KEY, across.supertile);
            let (canonical, other) = if socket.is_canonical() {
                (&mine, &theirs)
            } else {
                (&theirs, &mine)
            };
            let (canonical_socket, other_socket) = if socket.is_canonical() {
                (socket, across.socket)
            } else {
                (across.socket, socket)
            };

            assert_eq!(
                canonical.glyph(canonical_socket.anchor_index()),
                Some(word.glyphs[word.cut - 1]),
                "canonical anchor of {position:?} socket {socket:?}"
            );
            assert_eq!(
                other.glyph(other_socket.anchor_index()),
                Some(word.glyphs[word.cut]),
                "far anchor of {position:?} socket {socket:?}"
            );
            assert!(canonical.cell(canonical_socket.anchor_index()).has(colors::SOCKET));
            assert!(other.cell(other_socket.anchor_index()).has(colors::SOCKET));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_multiplanar_words_tagged_on_both_sides() {
    let config = GeneratorConfig {
        inclusion_rate: 0.6,
        ..GeneratorConfig::test()
    };
    let mut world = common::world(7, config);
    let key = world.add_dimension(Dimension::full("mixed", "base").with_multiplanar(&["french"]));

    let mut inclusions = 0;
    for x in 0..4 {
        let position = SupergridPosition::new(x, 0);
        let tile = common::generate(&mut world, &key, position);
        for socket in Socket::ALL {
            let anchor = *tile.cell(socket.anchor_index());
            if !anchor.has(colors::SOCKET) {
                continue;
            }
            let across = SocketRef::new(position, socket).across();
            let neighbor = common::generate(&mut world, &key, across.supertile);
            let far = *neighbor.cell(across.socket.anchor_index());
            assert!(far.has(colors::SOCKET));
            assert_eq!(anchor.domain, far.domain);
            assert_eq!(anchor.has(colors::INCLUSION), far.has(colors::INCLUSION));
            if anchor.has(colors::INCLUSION) {
                assert!((1..=4).contains(&anchor.domain));
                inclusions += 1;
            }
        }
    }
    assert!(inclusions > 0, "no borrowed words at a 60% inclusion rate");
}
