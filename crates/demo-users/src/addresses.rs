//! Fixed table of real Brazilian postal addresses.

/// One postal code with its canonical address fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAddress {
    /// Postal code with the `99999-999` mask.
    pub zip_code: &'static str,
    /// Street or square.
    pub address_name: &'static str,
    /// Neighbourhood.
    pub neighborhood: &'static str,
    /// City.
    pub city: &'static str,
    /// Two-letter federative unit code.
    pub state: &'static str,
    /// Telephone area code (DDD) serving the city.
    pub area_code: u8,
}

/// Addresses drawn from when generating users.
pub const SAMPLE_ADDRESSES: [SampleAddress; 8] = [
    SampleAddress {
        zip_code: "01001-000",
        address_name: "Praça da Sé",
        neighborhood: "Sé",
        city: "São Paulo",
        state: "SP",
        area_code: 11,
    },
    SampleAddress {
        zip_code: "01310-100",
        address_name: "Avenida Paulista",
        neighborhood: "Bela Vista",
        city: "São Paulo",
        state: "SP",
        area_code: 11,
    },
    SampleAddress {
        zip_code: "20010-000",
        address_name: "Praça Quinze de Novembro",
        neighborhood: "Centro",
        city: "Rio de Janeiro",
        state: "RJ",
        area_code: 21,
    },
    SampleAddress {
        zip_code: "22070-011",
        address_name: "Avenida Atlântica",
        neighborhood: "Copacabana",
        city: "Rio de Janeiro",
        state: "RJ",
        area_code: 21,
    },
    SampleAddress {
        zip_code: "70150-900",
        address_name: "Praça dos Três Poderes",
        neighborhood: "Zona Cívico-Administrativa",
        city: "Brasília",
        state: "DF",
        area_code: 61,
    },
    SampleAddress {
        zip_code: "30130-010",
        address_name: "Praça Sete de Setembro",
        neighborhood: "Centro",
        city: "Belo Horizonte",
        state: "MG",
        area_code: 31,
    },
    SampleAddress {
        zip_code: "40020-010",
        address_name: "Praça Tomé de Souza",
        neighborhood: "Centro",
        city: "Salvador",
        state: "BA",
        area_code: 71,
    },
    SampleAddress {
        zip_code: "80020-310",
        address_name: "Rua XV de Novembro",
        neighborhood: "Centro",
        city: "Curitiba",
        state: "PR",
        area_code: 41,
    },
];
