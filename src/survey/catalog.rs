//! Static content: the instrument catalogue and the landing page sections

/// A psychosocial assessment instrument offered on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const INSTRUMENTS: [Instrument; 13] = [
    Instrument {
        id: "hse-it",
        name: "HSE-IT",
        description: "Avalia demandas, controle, apoio, relacionamentos, papéis e mudanças organizacionais",
    },
    Instrument {
        id: "copsoq",
        name: "COPSOQ",
        description: "Avaliação ampla de demandas, controle, apoio e clima organizacional",
    },
    Instrument {
        id: "insat",
        name: "INSAT",
        description: "Liga condições de trabalho à saúde física e mental",
    },
    Instrument {
        id: "jcq",
        name: "JCQ",
        description: "Mede demanda, controle e apoio (modelo Karasek)",
    },
    Instrument {
        id: "wdq",
        name: "WDQ",
        description: "Analisa o desenho das tarefas e sua influência no bem-estar",
    },
    Instrument {
        id: "ew",
        name: "EW",
        description: "Mede esforço emocional exigido no trabalho",
    },
    Instrument {
        id: "ica",
        name: "ICA",
        description: "Avalia conflitos interpessoais em equipes",
    },
    Instrument {
        id: "ji",
        name: "JI",
        description: "Mede insegurança no emprego",
    },
    Instrument {
        id: "spoq",
        name: "SPOQ",
        description: "Avalia percepção de superqualificação",
    },
    Instrument {
        id: "wfc",
        name: "WFC",
        description: "Mede conflito entre trabalho e vida pessoal",
    },
    Instrument {
        id: "lipt",
        name: "LIPT",
        description: "Detecta assédio moral (mobbing)",
    },
    Instrument {
        id: "cvq",
        name: "CVQ",
        description: "Mede violência ou agressões de clientes/pacientes",
    },
    Instrument {
        id: "ssi",
        name: "SSI",
        description: "Avalia efeitos do trabalho em turnos (sono, fadiga, saúde, vida social)",
    },
];

/// Title plus description, used by the landing sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

pub const HERO_TITLE: &str = "Avaliação de Riscos Psicossociais";
pub const HERO_BADGE: &str = "Metodologia HSE-IT Internacional";
pub const HERO_TAGLINE: &str = "Solução inovadora para análise e gerenciamento de riscos psicossociais, \
baseada na NR-01 e na metodologia internacional HSE-IT. Promova ambientes de trabalho mais saudáveis e produtivos.";

pub const HERO_STATS: [(&str, &str); 3] = [
    ("7", "Dimensões Avaliadas"),
    ("Real-time", "Análise de Dados"),
    ("NR-01", "Compliance Legal"),
];

pub const METHODOLOGY: [Highlight; 4] = [
    Highlight {
        title: "Base Legal Sólida",
        description: "Fundamentado na NR-01 e Portaria SEPRT nº 6.730/2020, garantindo conformidade total com a legislação brasileira.",
    },
    Highlight {
        title: "Metodologia HSE-IT",
        description: "Utiliza o Health and Safety Executive Indicator Tool, reconhecido internacionalmente para avaliação de riscos psicossociais.",
    },
    Highlight {
        title: "Escala Likert",
        description: "Questionários com escala de 5 pontos para avaliação precisa e nuançada das dimensões psicossociais.",
    },
    Highlight {
        title: "Matriz de Risco",
        description: "Cruzamento inteligente de probabilidade e severidade, gerando classificação clara dos riscos identificados.",
    },
];

pub const FEATURES: [Highlight; 6] = [
    Highlight {
        title: "Multiplataforma",
        description: "Acesso via desktop e mobile com design responsivo e intuitivo.",
    },
    Highlight {
        title: "Gestão de Perfis",
        description: "Sistema com 3 níveis de acesso: Participante, Admin e Visualizador.",
    },
    Highlight {
        title: "Coleta Eficiente",
        description: "Interface fluida com uma pergunta por tela para melhor experiência.",
    },
    Highlight {
        title: "Dados Seguros",
        description: "ID único para cada participante com armazenamento seguro e confidencial.",
    },
    Highlight {
        title: "Power BI Integrado",
        description: "Visualização de resultados em tempo real com dashboards interativos.",
    },
    Highlight {
        title: "Experiência Mobile",
        description: "Aplicação otimizada para preenchimento em smartphones e tablets.",
    },
];

pub const CTA_TITLE: &str = "Pronto para Transformar a Saúde Organizacional?";
pub const CTA_TEXT: &str = "Junte-se às organizações que já estão promovendo ambientes de trabalho \
mais saudáveis e produtivos com nossa solução baseada na metodologia HSE-IT.";

pub fn instrument(id: &str) -> Option<&'static Instrument> {
    INSTRUMENTS.iter().find(|instrument| instrument.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_and_lookup() {
        let names: Vec<&str> = INSTRUMENTS.iter().map(|i| i.name).collect();
        assert_eq!(
            names,
            vec!["HSE-IT", "COPSOQ", "INSAT", "JCQ", "WDQ", "EW", "ICA", "JI", "SPOQ", "WFC", "LIPT", "CVQ", "SSI"]
        );
        assert_eq!(instrument("jcq").map(|i| i.name), Some("JCQ"));
        assert!(instrument("nope").is_none());
    }
}
