lazy_static::lazy_static! {
    static ref WEB3_KEYWORDS: Vec<&'static str> = vec![
        "web3", "crypto", "blockchain", "bitcoin", "btc", "ethereum", "eth",
        "defi", "nft", "dao", "token", "solana", "wallet", "staking",
        "altcoin", "stablecoin", "smart contract", "metaverse",
    ];
}

/// Case-insensitive substring match against the thematic keyword set.
pub fn matches_web3(text: &str) -> bool {
    let lowered = text.to_lowercase();
    WEB3_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
