/*!
 * Built-in term tables.
 *
 * Native term first, pivot (English) term second. When several native terms
 * share a pivot term, the first one listed is used on the way back out.
 */

// Hindi

pub(super) static HINDI_TERMS: &[(&str, &str)] = &[
    // crops and produce
    ("फसल", "crop"),
    ("फसलें", "crops"),
    ("धान", "rice"),
    ("चावल", "rice"),
    ("गेहूं", "wheat"),
    ("गेहूँ", "wheat"),
    ("कपास", "cotton"),
    ("मक्का", "maize"),
    ("गन्ना", "sugarcane"),
    ("सरसों", "mustard"),
    ("सोयाबीन", "soybean"),
    ("दाल", "pulses"),
    ("बाजरा", "bajra"),
    ("ज्वार", "jowar"),
    ("टमाटर", "tomato"),
    ("आलू", "potato"),
    ("प्याज", "onion"),
    ("सब्जी", "vegetable"),
    ("फल", "fruit"),
    ("बीज", "seed"),
    ("पौधा", "plant"),
    ("पौधे", "plants"),
    ("पत्तियां", "leaves"),
    ("पत्तियाँ", "leaves"),
    ("पत्ते", "leaves"),
    ("खरीफ", "kharif"),
    ("रबी", "rabi"),
    ("जायद", "zaid"),
    ("बुवाई", "sowing"),
    ("बोना", "sow"),
    ("उगाना", "grow"),
    ("खेती", "farming"),
    ("उपज", "yield"),
    ("किसान", "farmer"),
    ("खेत", "field"),
    ("मिट्टी", "soil"),
    ("खाद", "fertilizer"),
    ("उर्वरक", "fertilizer"),
    // weather
    ("मौसम", "weather"),
    ("पूर्वानुमान", "forecast"),
    ("बारिश", "rain"),
    ("वर्षा", "rainfall"),
    ("मानसून", "monsoon"),
    ("तापमान", "temperature"),
    ("नमी", "humidity"),
    ("हवा", "wind"),
    ("आंधी", "storm"),
    ("ओले", "hail"),
    ("पाला", "frost"),
    // water
    ("पानी", "water"),
    ("सिंचाई", "irrigation"),
    ("नहर", "canal"),
    ("ड्रिप", "drip"),
    ("पंप", "pump"),
    ("बोरवेल", "borewell"),
    // pests
    ("कीट", "pest"),
    ("कीड़े", "insects"),
    ("बीमारी", "disease"),
    ("रोग", "disease"),
    ("पीली", "yellow"),
    ("पीले", "yellow"),
    ("भूरे", "brown"),
    ("धब्बे", "spots"),
    ("छिड़काव", "spray"),
    ("कीटनाशक", "pesticide"),
    ("नुकसान", "damage"),
    // market and money
    ("बाजार", "market"),
    ("बाज़ार", "market"),
    ("मंडी", "mandi"),
    ("दाम", "price"),
    ("भाव", "price"),
    ("कीमत", "price"),
    ("दर", "rate"),
    ("लागत", "cost"),
    ("बेचना", "sell"),
    ("खरीदना", "buy"),
    ("क्विंटल", "quintal"),
    ("लाभ", "profit"),
    ("आय", "income"),
    ("योजना", "scheme"),
    ("सब्सिडी", "subsidy"),
    ("ऋण", "loan"),
    ("कर्ज", "loan"),
    ("बीमा", "insurance"),
    ("सरकार", "government"),
    ("सरकारी", "government"),
    ("बैंक", "bank"),
    ("पेंशन", "pension"),
    // time
    ("आज", "today"),
    ("कल", "tomorrow"),
    ("अभी", "now"),
];

/// Function words: translated on the way in, never produced on the way out.
pub(super) static HINDI_PARTICLES: &[(&str, &str)] = &[
    ("मेरे", "my"),
    ("मेरा", "my"),
    ("मेरी", "my"),
    ("में", "in"),
    ("का", "of"),
    ("की", "of"),
    ("के", "of"),
    ("है", "is"),
    ("हैं", "are"),
    ("और", "and"),
    ("से", "from"),
    ("को", "to"),
    ("पर", "on"),
    ("लिए", "for"),
    ("क्यों", "why"),
    ("करें", "do"),
    ("करूं", "do"),
];

pub(super) static HINDI_INBOUND_PHRASES: &[(&str, &str)] = &[
    ("के लिए", "for"),
    ("सबसे अच्छी", "best"),
    ("सबसे अच्छा", "best"),
    ("फसल बीमा", "crop insurance"),
    ("पीएम किसान", "pm kisan"),
    ("किसान क्रेडिट कार्ड", "kisan credit card"),
    ("कीट नियंत्रण", "pest control"),
    ("मौसम पूर्वानुमान", "weather forecast"),
    ("बाजार भाव", "market price"),
    ("मंडी भाव", "mandi price"),
];

pub(super) static HINDI_OUTBOUND_PHRASES: &[(&str, &str)] = &[
    (
        "No reliable data found — please consult your local agriculture extension officer",
        "कोई विश्वसनीय जानकारी नहीं मिली — कृपया अपने स्थानीय कृषि विस्तार अधिकारी से संपर्क करें",
    ),
    ("Based on your query", "आपके प्रश्न के आधार पर"),
    ("Here are some recommendations", "यहाँ कुछ सुझाव हैं"),
    ("You should", "आपको चाहिए"),
    ("It is recommended", "सुझाव दिया जाता है"),
    ("For better results", "बेहतर परिणाम के लिए"),
    ("Contact your local", "अपने स्थानीय से संपर्क करें"),
    ("agriculture extension officer", "कृषि विस्तार अधिकारी"),
    ("agriculture officer", "कृषि अधिकारी"),
    ("weather forecast", "मौसम पूर्वानुमान"),
    ("market price", "बाजार भाव"),
    ("good quality", "अच्छी गुणवत्ता"),
    ("proper irrigation", "उचित सिंचाई"),
    ("organic pesticides", "जैविक कीटनाशक"),
    ("field hygiene", "खेत की सफाई"),
];

/// (question particles, qualifier words, pivot opener)
pub(super) static HINDI_INTERROGATIVES: &[(&[&str], &[&str], &str)] = &[
    (&["क्या"], &["होगी", "होगा", "होंगे"], "Will there be"),
    (&["क्या"], &["है", "हैं"], "Is there"),
    (&["क्या"], &[], "What"),
    (&["कैसे"], &[], "How to"),
    (&["कब"], &[], "When"),
    (&["कहाँ", "कहां"], &[], "Where"),
    (&["कौन"], &["सी", "सा", "से"], "Which"),
    (&["कौन", "कौनसी", "कौनसा", "कौनसे"], &[], "Which"),
    (&["कितना", "कितनी", "कितने"], &[], "How much"),
];

// Bengali

pub(super) static BENGALI_TERMS: &[(&str, &str)] = &[
    ("ফসল", "crop"),
    ("ধান", "rice"),
    ("গম", "wheat"),
    ("পাট", "jute"),
    ("আলু", "potato"),
    ("বীজ", "seed"),
    ("সার", "fertilizer"),
    ("আবহাওয়া", "weather"),
    ("বৃষ্টি", "rain"),
    ("জল", "water"),
    ("সেচ", "irrigation"),
    ("পোকা", "pest"),
    ("রোগ", "disease"),
    ("বাজার", "market"),
    ("দাম", "price"),
    ("ঋণ", "loan"),
    ("বীমা", "insurance"),
    ("আজ", "today"),
    ("কাল", "tomorrow"),
];

// Tamil

pub(super) static TAMIL_TERMS: &[(&str, &str)] = &[
    ("பயிர்", "crop"),
    ("நெல்", "rice"),
    ("கோதுமை", "wheat"),
    ("பருத்தி", "cotton"),
    ("விதை", "seed"),
    ("உரம்", "fertilizer"),
    ("வானிலை", "weather"),
    ("மழை", "rain"),
    ("தண்ணீர்", "water"),
    ("நீர்ப்பாசனம்", "irrigation"),
    ("பூச்சி", "pest"),
    ("நோய்", "disease"),
    ("சந்தை", "market"),
    ("விலை", "price"),
    ("கடன்", "loan"),
    ("காப்பீடு", "insurance"),
    ("இன்று", "today"),
    ("நாளை", "tomorrow"),
];

// Telugu

pub(super) static TELUGU_TERMS: &[(&str, &str)] = &[
    ("పంట", "crop"),
    ("వరి", "rice"),
    ("గోధుమ", "wheat"),
    ("పత్తి", "cotton"),
    ("విత్తనం", "seed"),
    ("ఎరువు", "fertilizer"),
    ("వాతావరణం", "weather"),
    ("వర్షం", "rain"),
    ("నీరు", "water"),
    ("నీటిపారుదల", "irrigation"),
    ("పురుగు", "pest"),
    ("తెగులు", "disease"),
    ("మార్కెట్", "market"),
    ("ధర", "price"),
    ("రుణం", "loan"),
    ("బీమా", "insurance"),
    ("ఈరోజు", "today"),
    ("రేపు", "tomorrow"),
];
