//! Round-constant table for the width-2 Poseidon2 permutation over the BN254
//! scalar field, 6 full (external) rounds and 50 partial (internal) rounds.
//!
//! Generated once by rejection-sampling 254-bit draws from
//! SHAKE128("zkquery/poseidon2/bn254/t=2,rF=6,rP=50,d=5/v1") down to canonical
//! field elements. This table is the single source for both the native
//! permutation and the in-circuit gadget.

use ark_bn254::Fr;
use ark_ff::MontFp;

/// Per-round constants for the 6 external rounds (one per state element).
pub const EXTERNAL_ROUND_CONSTANTS: [[Fr; 2]; 6] = [
    [
        MontFp!("21437976454239464034176213621480514547337116997524991976006479183840632113507"),
        MontFp!("10559199739081620604378899967036359828850218233850116426106407039984669757754"),
    ],
    [
        MontFp!("16000710284826630115277557109198380329697076548235119171454238701440134204930"),
        MontFp!("12781860201884773971147115156778803350580421339684293960728428209977831906102"),
    ],
    [
        MontFp!("9852604593540424903123014852516744384547388695111503289363619147738968133825"),
        MontFp!("611352816395250871869367943663982598885425028772353874337536257057284898811"),
    ],
    [
        MontFp!("17657440015763948766271038060543417639727874736981497068697114812946719454960"),
        MontFp!("21393775898315656393807719123577293752215011259824704082333943916576424908721"),
    ],
    [
        MontFp!("9916702209696878535760578271626840563737460879995172688863676681953481611457"),
        MontFp!("393207761138658477184219171880823935723511326518529151551083474487663674563"),
    ],
    [
        MontFp!("5362981193766108981686380317157978630497126182499224261586399677549727308385"),
        MontFp!("1351897125746926457257757852060922240397631256589534466086250461527810115293"),
    ],
];

/// Per-round constants for the 50 internal rounds (added to state element 0).
pub const INTERNAL_ROUND_CONSTANTS: [Fr; 50] = [
    MontFp!("14165561289548913689044361234270396933113848897849251120968769311144272597137"),
    MontFp!("1886350911109305895202477842509069303714152304605743903710132132545664293817"),
    MontFp!("2019579236084460960182837301686688239931863187894298937119621846483398236186"),
    MontFp!("18785297164283354839580619468234236864220085263555286014141201177353284074665"),
    MontFp!("12540046732543362999915983097192080623265340106704266906770934509938495319155"),
    MontFp!("18073207840806116835172560204557429461717207789604721118116805032145778579839"),
    MontFp!("15509138269115231025701625801814271029381305092622867679602478210149710398345"),
    MontFp!("19242362127933734561954320467306438397397806123637009428444410998164170040911"),
    MontFp!("16905553764722797521383842259157073711173981480889539025796937691522770086462"),
    MontFp!("15348861939197864528542742936806180735712265636325253333341171014455494173512"),
    MontFp!("8770209736401022516946621727716651241734969616469710392191183590445101878888"),
    MontFp!("15647905318282207412864955724677175452100337665229689445626526949151475458585"),
    MontFp!("20724680338821863168454926738626202040138829477094789525359561892427207299147"),
    MontFp!("15914641543168924066056330525517335966909321599707032590775035252004800711255"),
    MontFp!("6238298462623883275680674600246803926425864752307437967334428949084645263476"),
    MontFp!("16317311981116728205663395982078359313893831446686377498878235018764212703290"),
    MontFp!("21280956312457433071408589412908628720483114062994226556428633313746854504940"),
    MontFp!("17706000826686696027025479622941638732434175435842793126577194921017385194548"),
    MontFp!("3160578982498968852750334585424042733563907203959175785113281751268706793194"),
    MontFp!("16005036796323260138430804505111800782549279052112835099791881397950089118922"),
    MontFp!("21289748425402837550256088221683891887319725207689723693761484744169777530500"),
    MontFp!("18076899063504572356395134645089377406332468274631736975887568905465799625849"),
    MontFp!("13281861911514541189250858125058306567195425305693063144099170497197253229308"),
    MontFp!("21454340445129025253807658662616215762660504202746469484485087726288325009013"),
    MontFp!("1783767879740922800043561485119328193016107219494183576835197598922516319957"),
    MontFp!("21125034058813894452336889817153568446348071933758330380797274631023184828976"),
    MontFp!("8538142601919233881176590954992013788539078443777956733903064060239077781002"),
    MontFp!("10039738553733371252246116890264824868542247004842930544166247930858842802158"),
    MontFp!("378633920437972510363067229039078433755589978283153380446547767703412357360"),
    MontFp!("14894292509019373647295019075499480109985003792229779853229380123520007144686"),
    MontFp!("14186297600204134825300067541076075838561794311931464454955609298360983120139"),
    MontFp!("6446303434940186868531761757279107358320844280725507650548094169340847457683"),
    MontFp!("8451790827789415696233236290863070385193190268343688712729127118337736067067"),
    MontFp!("8316532551154644412834204100365214191593220739025561912872923367585967595297"),
    MontFp!("6943633173699036339503328083323519628596918560762425771630892819138146691418"),
    MontFp!("9007577660887986144674042013795738323456544027501763898572688964140909537419"),
    MontFp!("19578222327471540017848225550621738225869288926661689185521491556032672772840"),
    MontFp!("16595401259812635787270276905635347364788013063543219954542583845174916728548"),
    MontFp!("18007846279333271167476539142025810176370779725646105636245330960448633689131"),
    MontFp!("6027513011467776456396530710777571987792599647812615996426370616088594106821"),
    MontFp!("315512677899801310279017787507574621993691744061460119890776431389924813841"),
    MontFp!("18512950531533928732757940958416344727379543174124373300840337050633338012470"),
    MontFp!("7093260165497805899380719158094869504141881987066395250962406077811824263824"),
    MontFp!("3150752152176054547030568720187186268681329180260174262419173180899381458900"),
    MontFp!("17772542041568244185604156737956726173825672046893532608159596004088282593749"),
    MontFp!("97659610760571371381658910288330264045726377273483811746445596681241122122"),
    MontFp!("19949705614555993681968030051688473059011074367661520535669376487743359119405"),
    MontFp!("7297763160322018176516662660662438365764874911022839333485438029334942511360"),
    MontFp!("11615446598238207776917727275831917696885503944686105102947689713558702118152"),
    MontFp!("18833142365410146852884571425902940180425936358208644938928006957790484712180"),
];
