//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use hexlex_core::Seed;
use hexlex_lexicon::Lexicon;
use hexlex_procedural::{GeneratorConfig, Supertile, WorldManager};
use hexlex_shared::SupergridPosition;

/// A small English frequency list.
pub const ENGLISH: &str = "\
# word frequency
the 56271872\nof 33950064\nand 29944184\nto 25956096\nin 17420636\ni 11764797
that 11073318\nwas 10078245\nhis 8799755\nhe 8397205\nit 8058110\nwith 7725512
is 7557477\nfor 7097981\nas 7037543\nhad 6139336\nyou 6048903\nnot 5741803
be 5662527\nher 5202501\non 5113263\nat 5091841\nby 5061050\nwhich 4580906
have 4346500\nor 4228287\nfrom 4108111\nthis 4015425\nhim 3971997\nbut 3894211
all 3703342\nshe 3415846\nthey 3340398\nwere 3323884\nmy 3277699\nare 3224178
me 3027134\none 2832569\ntheir 2820265\nso 2802481\nan 2641417\nsaid 2637136
them 2509917\nwe 2491655\nwho 2472663\nwould 2400858\nbeen 2357654\nwill 2320022
no 2182891\nwhen 1980046\nthere 1961200\nif 1951102\nmore 1899787\nout 1875351
up 1792600\ninto 1703617\ndo 1669895\nany 1604836\nyour 1599314\nwhat 1583551
has 1543680\nman 1443756\ncould 1438643\nother 1387934\nthan 1351336\nour 1324617
some 1272416\nvery 1225208\ntime 1200415\nupon 1176304\nabout 1163485\nmay 1127006
its 1126706\nonly 1099768\nnow 1099165\nlike 1079282\nlittle 1040733\nthen 1024004
can 1016525\nshould 1009016\nmade 998109\ndid 967624\nus 963020\nsuch 951011
great 940530\nbefore 929856\nmust 920624\ntwo 918216\nthese 912670\nsee 894541
know 883806\nover 875715\nmuch 855364\ndown 836007\nafter 831108\nfirst 822542
mr 812237\ngood 803911\nmen 778218\nown 723373\nnever 714855\nmost 705828
old 700904\nshall 700101\nday 697880\nwhere 692659\nthose 682049\ncame 667416
come 658549\nhimself 653810\nway 649722\nwork 638766\nlife 630648\nwithout 622390
go 611998\nmake 607640\nwell 605876\nthrough 603567\nbeing 599632\nlong 590856
say 587290\nmight 580773\nhow 575920\nam 569468\ntoo 560998\neven 555940
again 536932\nmany 536131\nback 531063\nhere 524752\nthink 509690
every 508087\npeople 503917\nwent 498734\nsame 492849\nlast 487542\nthought 484963
away 479613\nunder 474838\ntake 463972\nfound 455789\nhand 446640\neyes 442924
still 441949\nplace 438831\nwhile 435538\njust 433858\nalso 431813\nyoung 427282
yet 418942\nthough 414926\nagainst 409633\nthings 407512\nget 406394\never 405108
give 404058\ngod 398846\nyears 397024\noff 392451\nface 391245\nnothing 390066
right 386451\nonce 385463\nanother 384416\nleft 377870\npart 377128\nsaw 374854
house 372883\nworld 372122\nhead 368954\nthree 368298\ntook 365961\nnew 362868
love 359453\nalways 358960\nmrs 356918\nput 355627\nnight 352994\neach 351719
king 348815\nbetween 345779\ntell 342434\nmind 341209\nheart 339839\nwhole 335813
hexagon 300000\nhoneycomb 250000\nlattice 200000\ntessellation 150000\nextraordinarily 100000
";

/// A second domain for multiplanar inclusions.
pub const FRENCH: &str = "\
le 500\nde 480\nun 400\nêtre 380\net 370\nà 360\nil 350\navoir 340\nne 330\nje 320
son 310\nque 300\nse 290\nqui 280\nce 270\ndans 260\nen 250\ndu 240\nelle 230\nau 220
monde 200\nruche 180\nabeille 160\nmiel 150\ncellule 140\nhexagone 130\nchemin 120\n";

/// A lexicon holding "base" (English) and "french".
pub fn lexicon() -> Arc<Lexicon> {
    let lexicon = Arc::new(Lexicon::new());
    lexicon.insert_text("base", ENGLISH).unwrap();
    lexicon.insert_text("french", FRENCH).unwrap();
    lexicon
}

/// A manager over [`lexicon`].
pub fn world(seed: u32, config: GeneratorConfig) -> WorldManager {
    WorldManager::new(Seed::new(seed), config, lexicon()).unwrap()
}

/// Requests one supertile and ticks until it is loaded.
pub fn generate(world: &mut WorldManager, key: &str, position: SupergridPosition) -> Arc<Supertile> {
    world.request(key, position).unwrap();
    world.flush();
    world
        .supertile(key, position)
        .unwrap_or_else(|| panic!("supertile {position:?} of {key} never loaded"))
}
