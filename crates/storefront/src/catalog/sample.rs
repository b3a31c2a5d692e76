//! Sample marketplace data.

use vinea_core::{
    CatalogItem, CatalogItemId, Price, Project, ProjectId, Reward, Vineyard, VineyardId,
};

struct WineRow {
    id: &'static str,
    name: &'static str,
    year: i32,
    price: u32,
    image: &'static str,
    rating: f32,
    wine_type: &'static str,
    region: &'static str,
    description: &'static str,
    stock: u32,
    vineyard: &'static str,
}

const WINES: &[WineRow] = &[
    WineRow {
        id: "1",
        name: "Château Margaux Grand Cru",
        year: 2015,
        price: 120,
        image: "photo-1586370434639-0fe27fbd46f6",
        rating: 4.8,
        wine_type: "Rouge",
        region: "Bordeaux",
        description: "Un vin élégant avec des notes de cassis, de violette et une touche de chêne. Tanins soyeux et finale persistante.",
        stock: 15,
        vineyard: "1",
    },
    WineRow {
        id: "2",
        name: "Domaine de la Romanée-Conti",
        year: 2017,
        price: 250,
        image: "photo-1584916201218-f4242ceb4809",
        rating: 4.9,
        wine_type: "Rouge",
        region: "Bourgogne",
        description: "Un pinot noir exceptionnel aux arômes de fruits rouges, d'épices et de sous-bois. Structure délicate et complexe.",
        stock: 5,
        vineyard: "2",
    },
    WineRow {
        id: "3",
        name: "Château d'Yquem Sauternes",
        year: 2010,
        price: 180,
        image: "photo-1569919659476-f0852f6834b7",
        rating: 4.7,
        wine_type: "Blanc",
        region: "Bordeaux",
        description: "Un vin liquoreux d'exception avec des notes de miel, d'abricot confit et de vanille. Équilibre parfait entre sucrosité et acidité.",
        stock: 8,
        vineyard: "1",
    },
    WineRow {
        id: "4",
        name: "Domaine Leflaive Montrachet",
        year: 2018,
        price: 200,
        image: "photo-1566952579007-432838148d95",
        rating: 4.6,
        wine_type: "Blanc",
        region: "Bourgogne",
        description: "Un chardonnay d'exception aux arômes de fruits blancs, de noisette et de minéralité. Texture crémeuse et finale longue.",
        stock: 10,
        vineyard: "2",
    },
    WineRow {
        id: "5",
        name: "Dom Pérignon Vintage",
        year: 2012,
        price: 150,
        image: "photo-1594372366280-9b96ac46a2b8",
        rating: 4.8,
        wine_type: "Champagne",
        region: "Champagne",
        description: "Un champagne prestigieux aux notes d'agrumes, de brioche et de fleurs blanches. Effervescence fine et persistante.",
        stock: 12,
        vineyard: "3",
    },
    WineRow {
        id: "6",
        name: "Château Cheval Blanc",
        year: 2016,
        price: 140,
        image: "photo-1553361371-9b22f78e9b10",
        rating: 4.7,
        wine_type: "Rouge",
        region: "Bordeaux",
        description: "Un assemblage de merlot et cabernet franc aux arômes de fruits noirs, d'épices et de truffe. Structure puissante et élégante.",
        stock: 7,
        vineyard: "1",
    },
    WineRow {
        id: "7",
        name: "Barolo Monfortino Giacomo Conterno",
        year: 2014,
        price: 160,
        image: "photo-1568213816046-0a8e0e9a40fa",
        rating: 4.6,
        wine_type: "Rouge",
        region: "Italie",
        description: "Un nebbiolo d'exception aux arômes de rose, de goudron et de cerise. Tanins puissants et finale interminable.",
        stock: 9,
        vineyard: "4",
    },
    WineRow {
        id: "8",
        name: "Château Pétrus",
        year: 2015,
        price: 300,
        image: "photo-1516594915697-87eb3b1c14ea",
        rating: 5.0,
        wine_type: "Rouge",
        region: "Bordeaux",
        description: "Un merlot d'exception aux arômes de fruits noirs, de truffe et de violette. Texture veloutée et finale interminable.",
        stock: 3,
        vineyard: "1",
    },
];

pub(super) fn wines() -> Vec<CatalogItem> {
    WINES
        .iter()
        .map(|row| CatalogItem {
            id: CatalogItemId::new(row.id),
            name: row.name.to_string(),
            year: row.year,
            price: Price::from_units(row.price),
            image_url: format!("https://images.unsplash.com/{}?w=600&q=80", row.image),
            stock: row.stock,
            wine_type: row.wine_type.to_string(),
            region: row.region.to_string(),
            rating: row.rating,
            description: row.description.to_string(),
            vineyard_id: VineyardId::new(row.vineyard),
        })
        .collect()
}

pub(super) fn vineyards() -> Vec<Vineyard> {
    [
        (
            "1",
            "Château Bordeaux",
            "Bordeaux, France",
            "Domaine fondé au XVIIIe siècle au cœur de Saint-Émilion, quinze hectares de terroir argilo-calcaire plantés de merlot et de cabernet franc.",
            4,
        ),
        (
            "2",
            "Domaine de Bourgogne",
            "Bourgogne, France",
            "Pinot noir et chardonnay de la Côte d'Or, vinifiés parcelle par parcelle.",
            2,
        ),
        (
            "3",
            "Maison de Champagne",
            "Champagne, France",
            "Maison familiale de la Montagne de Reims, cuvées millésimées de longue garde.",
            1,
        ),
        (
            "4",
            "Tenuta Italiana",
            "Piémont, Italie",
            "Nebbiolo des collines des Langhe, élevé longuement en grands foudres.",
            1,
        ),
    ]
    .into_iter()
    .map(|(id, name, region, description, wine_count)| Vineyard {
        id: VineyardId::new(id),
        name: name.to_string(),
        region: region.to_string(),
        description: description.to_string(),
        wine_count,
    })
    .collect()
}

struct ProjectRow {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    image: &'static str,
    goal: u32,
    raised: u32,
    days_left: u32,
    location: &'static str,
    owner: &'static str,
    avatar_seed: &'static str,
    region: &'static str,
}

const PROJECTS: &[ProjectRow] = &[
    ProjectRow {
        id: "1",
        title: "Restauration du Patrimoine Château Bordeaux",
        description: "Aidez-nous à restaurer ce vignoble du 18ème siècle à sa gloire d'antan et rejoignez notre club de vin exclusif avec un accès spécial aux millésimes.",
        image: "photo-1597916829826-02e5bb4a54e0",
        goal: 50_000,
        raised: 32_500,
        days_left: 21,
        location: "Bordeaux, France",
        owner: "Marie Dubois",
        avatar_seed: "Marie",
        region: "bordeaux",
    },
    ProjectRow {
        id: "2",
        title: "Conversion Bio des Collines Toscanes",
        description: "Soutenez la transition de notre vignoble familial vers des méthodes de production entièrement biologiques tout en vous assurant l'accès à nos vins de réserve limités.",
        image: "photo-1563514227147-6d2ff665a6a0",
        goal: 35_000,
        raised: 28_000,
        days_left: 14,
        location: "Toscane, Italie",
        owner: "Marco Bianchi",
        avatar_seed: "Marco",
        region: "italie",
    },
    ProjectRow {
        id: "3",
        title: "Expérimentation de Nouveaux Cépages à Napa Valley",
        description: "Rejoignez-nous dans le développement d'un cépage résistant au climat qui pourrait révolutionner la production viticole californienne face aux changements climatiques.",
        image: "photo-1560493676-04071c5f467b",
        goal: 75_000,
        raised: 41_200,
        days_left: 30,
        location: "Napa Valley, USA",
        owner: "Sarah Johnson",
        avatar_seed: "Sarah",
        region: "usa",
    },
    ProjectRow {
        id: "4",
        title: "Expansion en Haute Altitude à Mendoza",
        description: "Aidez-nous à étendre notre vignoble à des altitudes plus élevées dans les Andes pour produire des Malbecs plus complexes avec des expressions de terroir uniques.",
        image: "photo-1566903451935-7e8833da3b22",
        goal: 60_000,
        raised: 18_000,
        days_left: 45,
        location: "Mendoza, Argentine",
        owner: "Carlos Mendez",
        avatar_seed: "Carlos",
        region: "argentine",
    },
    ProjectRow {
        id: "5",
        title: "Innovation en Vin Mousseux de la Vallée de la Loire",
        description: "Financez notre production expérimentale de vin mousseux utilisant des méthodes traditionnelles avec une technologie moderne pour une nouvelle génération de bulles.",
        image: "photo-1506377247377-2a5b3b417ebb",
        goal: 40_000,
        raised: 22_500,
        days_left: 28,
        location: "Vallée de la Loire, France",
        owner: "Jeanne Moreau",
        avatar_seed: "Jeanne",
        region: "loire",
    },
    ProjectRow {
        id: "6",
        title: "Vignoble Biodynamique en Bourgogne",
        description: "Participez à notre conversion vers des pratiques biodynamiques complètes pour produire des vins qui expriment véritablement le terroir bourguignon.",
        image: "photo-1584916201218-f4242ceb4809",
        goal: 45_000,
        raised: 15_000,
        days_left: 60,
        location: "Bourgogne, France",
        owner: "Philippe Laurent",
        avatar_seed: "Philippe",
        region: "bourgogne",
    },
];

/// Reward tiers offered by the Château Bordeaux restoration.
const HERITAGE_REWARDS: &[(u32, &str, &str)] = &[
    (
        100,
        "Soutien Initial",
        "Une bouteille de notre millésime actuel et votre nom sur notre mur des soutiens.",
    ),
    (
        250,
        "Pack Découverte",
        "Trois bouteilles de nos différentes cuvées et une visite guidée privée du domaine.",
    ),
    (
        500,
        "Club du Vin",
        "Adhésion d'un an à notre club de vin avec livraison trimestrielle de bouteilles sélectionnées.",
    ),
    (
        1000,
        "Parrainage de Vigne",
        "Parrainez une rangée de vignes avec plaque personnalisée et recevez chaque année des bouteilles de cette parcelle.",
    ),
    (
        5000,
        "Expérience VIP",
        "Week-end complet au domaine avec hébergement, dégustations privées et dîner avec le vigneron.",
    ),
];

pub(super) fn projects() -> Vec<Project> {
    PROJECTS
        .iter()
        .map(|row| Project {
            id: ProjectId::new(row.id),
            title: row.title.to_string(),
            description: row.description.to_string(),
            image_url: format!("https://images.unsplash.com/{}?w=600&q=80", row.image),
            funding_goal: Price::from_units(row.goal),
            current_funding: Price::from_units(row.raised),
            days_left: row.days_left,
            location: row.location.to_string(),
            owner_name: row.owner.to_string(),
            owner_avatar_url: format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                row.avatar_seed
            ),
            region: row.region.to_string(),
            rewards: if row.id == "1" {
                HERITAGE_REWARDS
                    .iter()
                    .map(|&(amount, title, description)| Reward {
                        amount: Price::from_units(amount),
                        title: title.to_string(),
                        description: description.to_string(),
                    })
                    .collect()
            } else {
                Vec::new()
            },
        })
        .collect()
}
